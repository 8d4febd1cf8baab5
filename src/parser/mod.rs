// Parser module: typed access into the audit report JSON.

pub mod audit_parser;

pub use audit_parser::SiteHealthView;
