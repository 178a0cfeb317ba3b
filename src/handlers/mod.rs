pub mod generate;


pub use generate::{configure_generate_routes, json_config};
