mod common;
mod comparison;
mod routing;
mod service;
