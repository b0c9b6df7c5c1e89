mod common;
mod completion;
mod keys;
