pub mod format;
pub mod line_reader;
pub mod parser;

pub use format::{
    format_output, format_status, format_trace_row, ConsoleLine, GESTURE_TRACE_HEADER, LINE_END,
};
pub use line_reader::{ConsoleLineReader, LineReadEvent, CONSOLE_LINE_MAX};
pub use parser::{parse_console_command, ConsoleCommand, SensitivityAdjust};
