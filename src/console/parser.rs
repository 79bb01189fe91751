#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SensitivityAdjust {
    StepUp,
    StepDown,
    By(i32),
}

impl SensitivityAdjust {
    pub const fn delta(self, step: i32) -> i32 {
        match self {
            SensitivityAdjust::StepUp => step,
            SensitivityAdjust::StepDown => step.saturating_neg(),
            SensitivityAdjust::By(delta) => delta,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsoleCommand {
    Ping,
    Status,
    Sensitivity(SensitivityAdjust),
    Trace { enabled: bool },
}

pub fn parse_console_command(line: &[u8]) -> Option<ConsoleCommand> {
    let line = line.trim_ascii();
    let (verb, rest) = split_token(line);

    if verb.eq_ignore_ascii_case(b"PING") && rest.is_empty() {
        return Some(ConsoleCommand::Ping);
    }
    if (verb.eq_ignore_ascii_case(b"STATUS") || verb.eq_ignore_ascii_case(b"STATE"))
        && rest.is_empty()
    {
        return Some(ConsoleCommand::Status);
    }
    if verb.eq_ignore_ascii_case(b"SENS") {
        return parse_sensitivity_arg(rest).map(ConsoleCommand::Sensitivity);
    }
    if verb.eq_ignore_ascii_case(b"TRACE") {
        return parse_on_off(rest).map(|enabled| ConsoleCommand::Trace { enabled });
    }
    None
}

fn parse_sensitivity_arg(arg: &[u8]) -> Option<SensitivityAdjust> {
    if arg.eq_ignore_ascii_case(b"UP") {
        Some(SensitivityAdjust::StepUp)
    } else if arg.eq_ignore_ascii_case(b"DOWN") {
        Some(SensitivityAdjust::StepDown)
    } else {
        parse_signed_delta(arg).map(SensitivityAdjust::By)
    }
}

fn parse_on_off(arg: &[u8]) -> Option<bool> {
    if arg.eq_ignore_ascii_case(b"ON") || arg == b"1" {
        Some(true)
    } else if arg.eq_ignore_ascii_case(b"OFF") || arg == b"0" {
        Some(false)
    } else {
        None
    }
}

/// Splits off the first whitespace-delimited token; the rest is trimmed.
fn split_token(line: &[u8]) -> (&[u8], &[u8]) {
    match line.iter().position(u8::is_ascii_whitespace) {
        Some(end) => (&line[..end], line[end..].trim_ascii()),
        None => (line, &line[line.len()..]),
    }
}

/// `+N` or `-N`. The sign is mandatory so a bare number is never taken as a delta.
fn parse_signed_delta(arg: &[u8]) -> Option<i32> {
    let (&sign, digits) = arg.split_first()?;
    let negative = match sign {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.iter().try_fold(0i32, |acc, &digit| {
        if !digit.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(i32::from(digit - b'0'))
    })?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands_case_insensitively() {
        assert_eq!(parse_console_command(b"PING"), Some(ConsoleCommand::Ping));
        assert_eq!(parse_console_command(b"  status "), Some(ConsoleCommand::Status));
        assert_eq!(parse_console_command(b"STATE"), Some(ConsoleCommand::Status));
        assert_eq!(
            parse_console_command(b"trace on"),
            Some(ConsoleCommand::Trace { enabled: true })
        );
        assert_eq!(
            parse_console_command(b"TRACE OFF"),
            Some(ConsoleCommand::Trace { enabled: false })
        );
    }

    #[test]
    fn parses_sensitivity_steps_and_signed_deltas() {
        assert_eq!(
            parse_console_command(b"SENS UP"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::StepUp))
        );
        assert_eq!(
            parse_console_command(b"sens down"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::StepDown))
        );
        assert_eq!(
            parse_console_command(b"SENS +50"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::By(50)))
        );
        assert_eq!(
            parse_console_command(b"SENS  -1000"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::By(-1_000)))
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            b"".as_slice(),
            b"PING 1",
            b"SENS",
            b"SENS +",
            b"SENS 12x",
            b"SENS +12x",
            b"SENS 980",
            b"SENS +-5",
            b"SENS +99999999999",
            b"TRACE maybe",
            b"REBOOT",
        ] {
            assert_eq!(parse_console_command(line), None, "{line:?}");
        }
    }

    #[test]
    fn unsigned_sensitivity_value_is_rejected() {
        assert_eq!(parse_console_command(b"SENS 980"), None);
        assert_eq!(
            parse_console_command(b"SENS +980"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::By(980)))
        );
        assert_eq!(
            parse_console_command(b"SENS -0"),
            Some(ConsoleCommand::Sensitivity(SensitivityAdjust::By(0)))
        );
    }

    #[test]
    fn step_adjustments_resolve_against_configured_step() {
        assert_eq!(SensitivityAdjust::StepUp.delta(25), 25);
        assert_eq!(SensitivityAdjust::StepDown.delta(25), -25);
        assert_eq!(SensitivityAdjust::By(-7).delta(25), -7);
    }
}
