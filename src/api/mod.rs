//! Clients for remote market-data APIs

pub mod coinmarketcap;
