pub mod checkout;
pub mod credits;
pub mod handlers;
pub mod tiers;
pub mod webhook;
