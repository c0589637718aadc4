pub mod khalti;
pub mod reconcile;
