mod cli;
mod configuration;
mod image;
