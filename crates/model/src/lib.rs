pub mod listing;
pub mod search;

pub trait ExampleData {
    fn example_data() -> Self;
}
