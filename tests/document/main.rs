mod data;
mod records;
