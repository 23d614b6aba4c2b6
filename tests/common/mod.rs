#![allow(unused_imports)]
pub mod test_prelude;
pub mod test_utils;
