//! scorecard — client form controller for a student performance
//! prediction service.
//!
//! The controller validates form input, posts it to the service, and renders
//! the returned prediction and the service's statistics into two page
//! containers. The page is abstracted behind [`page::Page`], with a terminal
//! host for the CLI and an in-memory host behind the local web page.

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod form;
pub mod logger;
pub mod page;
pub mod render;
pub mod web;
