pub mod homework;

pub use homework::{Homework, HomeworkBatch, HomeworkStatus};
