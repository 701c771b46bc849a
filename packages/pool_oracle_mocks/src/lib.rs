#![cfg(not(tarpaulin_include))]

use std::{cell::RefCell, rc::Rc};

use cosmwasm_std::Addr;
use cw_multi_test::App;

pub use {
    pool::MockPool,
    registry::{MockRegistry, MockRegistryBuilder},
    token::{MockToken, MockTokenBuilder},
};

pub mod pool;
pub mod registry;
pub mod token;

pub const OWNER: &str = "owner";

pub fn owner_address() -> Addr {
    Addr::unchecked(OWNER)
}

pub type MockApp = Rc<RefCell<App>>;

pub fn mock_app() -> MockApp {
    Rc::new(RefCell::new(App::default()))
}
