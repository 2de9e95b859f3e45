// Presentation helpers for the command-line front end.

pub mod form_view;
