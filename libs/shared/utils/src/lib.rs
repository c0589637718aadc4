pub mod datekey;
pub mod test_utils;
