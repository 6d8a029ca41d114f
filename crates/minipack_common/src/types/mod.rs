pub mod arg_value;
pub mod cli_arguments;
pub mod compiled_configuration;
pub mod config_file_ref;
pub mod plugin_specifier;
pub mod raw_config_value;
