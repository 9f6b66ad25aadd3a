mod output_contracts;
mod parse_help_parity;
pub mod support;
