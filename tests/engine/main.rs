
mod counter;
mod template;
