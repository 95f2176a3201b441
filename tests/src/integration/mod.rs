pub mod custody;
pub mod sale_flows;
