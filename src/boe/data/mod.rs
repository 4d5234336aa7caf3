pub mod filings;
