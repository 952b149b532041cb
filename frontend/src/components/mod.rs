pub mod chart;
pub mod form;
pub mod modal;
pub mod stats;
pub mod template;
pub mod toast;
pub mod transactions;
