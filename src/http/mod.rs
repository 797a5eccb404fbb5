pub mod flash;
pub mod routing;
pub mod views;
