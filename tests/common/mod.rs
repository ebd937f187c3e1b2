#![allow(dead_code)]

pub use tmplwatch_test_utils::{builders, fakes, init_tracing};
