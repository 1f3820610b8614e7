//! 산출 결과 저장소.

mod result_csv;

pub use result_csv::{
    comparison_file_name, read_index_csv, result_file_name, write_comparison_csv,
    write_index_csv, ResultWriter,
};
