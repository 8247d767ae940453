pub mod cash_in;
pub mod cash_out;
pub mod credentials;
pub mod params;
pub mod records;
pub mod selector;
