// File: ./src/dashboard/mod.rs
pub mod fetch;
pub mod view;

pub use fetch::{CycleResult, FetchMode, FetchOrchestrator, FetchTicket};
pub use view::{Dashboard, DashboardRender, DashboardSections, Placeholder, Section, ViewState};
