mod common;
mod profile;
