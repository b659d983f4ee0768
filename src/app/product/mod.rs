//! 商品模块

pub mod coerce;
pub mod handler;
pub mod model;
pub mod seed;
pub mod service;
