// Cached regular expressions used when reading naming attributes

#[macro_use]
mod cache;
