pub mod http_seed;
pub mod seed_source;
