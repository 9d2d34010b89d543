mod listings_tests;
mod nearby_tests;
mod panel_tests;
mod session_tests;
