// ABOUTME: Command module aggregator for the kiln CLI.
// ABOUTME: Re-exports the run command handler.

mod run;

pub use run::run;
