pub mod run;
pub mod shell;
