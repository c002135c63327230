pub mod enable_all_regions;
pub mod enable_log_validation;
