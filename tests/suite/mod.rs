mod adapters;
mod cli;
mod windowing;
