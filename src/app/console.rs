use core::sync::atomic::Ordering;

use embassy_time::{with_timeout, Duration};
use greet::{
    console::{
        format_output, format_status, format_trace_row, parse_console_command, ConsoleCommand,
        ConsoleLineReader, LineReadEvent, GESTURE_TRACE_HEADER, LINE_END,
    },
    gesture_engine::{config::active_config, GestureCommand},
};

use super::{
    config::{
        CONSOLE_EVENTS, CONSOLE_POLL_MS, GESTURE_TRACE_ENABLED, GESTURE_TRACE_SAMPLES,
        STATUS_SNAPSHOT,
    },
    queue::enqueue_command_with_retry,
    telemetry::telemetry_line,
    types::SerialUart,
};

enum LineOutcome {
    Command(ConsoleCommand),
    Unknown,
    Overflow,
}

#[embassy_executor::task]
pub(crate) async fn console_task(mut uart: SerialUart) {
    let mut reader = ConsoleLineReader::new();
    let mut rx = [0u8; 1];
    let step = active_config().classifier.sensitivity_step;

    let _ = uart_write_line(&mut uart, "READY greet").await;

    loop {
        while let Ok(output) = CONSOLE_EVENTS.try_receive() {
            let _ = uart_write_line(&mut uart, &format_output(&output)).await;
        }

        while let Ok(sample) = GESTURE_TRACE_SAMPLES.try_receive() {
            if GESTURE_TRACE_ENABLED.load(Ordering::Relaxed) {
                let _ = uart_write_line(&mut uart, &format_trace_row(&sample)).await;
            }
        }

        let Ok(Ok(1)) =
            with_timeout(Duration::from_millis(CONSOLE_POLL_MS), uart.read_async(&mut rx)).await
        else {
            continue;
        };

        let outcome = match reader.push_byte(rx[0]) {
            LineReadEvent::None => continue,
            LineReadEvent::Overflow => LineOutcome::Overflow,
            LineReadEvent::Complete(line) => match parse_console_command(line) {
                Some(command) => LineOutcome::Command(command),
                None => LineOutcome::Unknown,
            },
        };

        match outcome {
            LineOutcome::Overflow => {
                let _ = uart_write_line(&mut uart, "ERR line too long").await;
            }
            LineOutcome::Unknown => {
                let _ = uart_write_line(&mut uart, "ERR unknown command").await;
            }
            LineOutcome::Command(command) => run_command(&mut uart, command, step).await,
        }
    }
}

async fn run_command(uart: &mut SerialUart, command: ConsoleCommand, step: i32) {
    match command {
        ConsoleCommand::Ping => {
            let _ = uart_write_line(uart, "PONG").await;
        }
        ConsoleCommand::Status => {
            let snapshot = STATUS_SNAPSHOT.lock(|cell| cell.get());
            let _ = uart_write_line(uart, &format_status(&snapshot)).await;
            let _ = uart_write_line(uart, &telemetry_line()).await;
        }
        ConsoleCommand::Sensitivity(adjust) => {
            let delta = adjust.delta(step);
            let reply = if enqueue_command_with_retry(GestureCommand::AdjustSensitivity { delta })
                .await
            {
                "OK"
            } else {
                "BUSY"
            };
            let _ = uart_write_line(uart, reply).await;
        }
        ConsoleCommand::Trace { enabled } => {
            GESTURE_TRACE_ENABLED.store(enabled, Ordering::Relaxed);
            let _ = uart_write_line(uart, "OK").await;
            if enabled {
                let _ = uart_write_line(uart, GESTURE_TRACE_HEADER).await;
            }
        }
    }
}

async fn uart_write_line(uart: &mut SerialUart, line: &str) -> bool {
    uart_write_all(uart, line.as_bytes()).await && uart_write_all(uart, LINE_END.as_bytes()).await
}

async fn uart_write_all(uart: &mut SerialUart, mut bytes: &[u8]) -> bool {
    while !bytes.is_empty() {
        match uart.write_async(bytes).await {
            Ok(0) => return false,
            Ok(written) => bytes = &bytes[written..],
            Err(_) => return false,
        }
    }
    true
}
