pub mod cell;
pub mod constraint;
pub mod controller;
pub mod generator;
pub mod grid;
pub mod io;
pub mod solver;
pub mod state;
pub mod validator;

// Necessary to export the modules to be integration tested in 'tests'
