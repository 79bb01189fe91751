use core::fmt::Write;

use crate::gesture_engine::{
    BatchTraceSample, Channel, ClassifierSnapshot, GestureOutput, InactivityEvent,
};

pub const CONSOLE_LINE_CAP: usize = 192;
pub const LINE_END: &str = "\r\n";

pub type ConsoleLine = heapless::String<CONSOLE_LINE_CAP>;

pub const GESTURE_TRACE_HEADER: &str = "gesture_trace,ms,n,x0,y0,z0,dx,dy,dz,mean_x,mean_y,mean_z,dominant,threshold,accepting,shake,fist_bump,high_five,promoted,detected";

pub fn format_output(output: &GestureOutput) -> ConsoleLine {
    let mut line = ConsoleLine::new();
    let _ = match output {
        GestureOutput::Detected(event) => write!(
            &mut line,
            "GESTURE kind={} label=\"{}\" count={}",
            event.channel.key(),
            event.channel.label(),
            event.count
        ),
        GestureOutput::InactivityAlert(_) => {
            write!(&mut line, "INACTIVE ALERT msg=\"{}\"", InactivityEvent::MESSAGE)
        }
        GestureOutput::InactivityCleared => write!(&mut line, "INACTIVE CLEAR"),
        GestureOutput::SensitivityChanged { threshold } => {
            write!(&mut line, "SENS threshold={threshold}")
        }
    };
    line
}

pub fn format_status(snapshot: &ClassifierSnapshot) -> ConsoleLine {
    let mut line = ConsoleLine::new();
    let _ = write!(&mut line, "STATUS");
    for channel in Channel::ALL {
        let _ = write!(
            &mut line,
            " {}={}",
            channel.key(),
            snapshot.counts[channel.index()]
        );
    }
    let _ = write!(
        &mut line,
        " threshold={} accepting={} alert={} axes={}/{}/{}",
        snapshot.sensitivity,
        u8::from(snapshot.accepting_input),
        u8::from(snapshot.alert_visible),
        snapshot.states[0].label(),
        snapshot.states[1].label(),
        snapshot.states[2].label(),
    );
    line
}

pub fn format_trace_row(sample: &BatchTraceSample) -> ConsoleLine {
    let mut line = ConsoleLine::new();
    let _ = write!(
        &mut line,
        "gesture_trace,{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{:#04x},{:#04x}",
        sample.now_ms,
        sample.sample_count,
        sample.first.x,
        sample.first.y,
        sample.first.z,
        sample.deltas.dx,
        sample.deltas.dy,
        sample.deltas.dz,
        sample.means.x,
        sample.means.y,
        sample.means.z,
        sample.dominant.map_or("-", Channel::key),
        sample.sensitivity,
        u8::from(sample.accepting_input),
        sample.states[Channel::Shake.index()].as_u8(),
        sample.states[Channel::FistBump.index()].as_u8(),
        sample.states[Channel::HighFive.index()].as_u8(),
        sample.promoted_mask,
        sample.detected_mask,
    );
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture_engine::{
        features::{BatchMeans, EndpointDeltas},
        AxisState, DetectedEvent, Sample,
    };

    #[test]
    fn formats_gesture_events() {
        let line = format_output(&GestureOutput::Detected(DetectedEvent {
            channel: Channel::FistBump,
            count: 3,
        }));
        assert_eq!(line.as_str(), "GESTURE kind=fist_bump label=\"Fist Bumps\" count=3");

        let line = format_output(&GestureOutput::InactivityAlert(InactivityEvent));
        assert_eq!(line.as_str(), "INACTIVE ALERT msg=\"You're too shy.\"");
        assert_eq!(
            format_output(&GestureOutput::InactivityCleared).as_str(),
            "INACTIVE CLEAR"
        );
        assert_eq!(
            format_output(&GestureOutput::SensitivityChanged { threshold: -15 }).as_str(),
            "SENS threshold=-15"
        );
    }

    #[test]
    fn formats_status_snapshot() {
        let snapshot = ClassifierSnapshot {
            counts: [2, 0, 7],
            sensitivity: 1_005,
            accepting_input: false,
            alert_visible: true,
            states: [
                AxisState::Approaching,
                AxisState::Idle,
                AxisState::ImpactCandidate,
            ],
        };
        assert_eq!(
            format_status(&snapshot).as_str(),
            "STATUS shake=2 fist_bump=0 high_five=7 threshold=1005 accepting=0 alert=1 axes=approaching/idle/impact"
        );
    }

    #[test]
    fn trace_row_matches_header_columns() {
        let sample = BatchTraceSample {
            now_ms: 400,
            sample_count: 5,
            first: Sample::new(50, -3, 1_000),
            deltas: EndpointDeltas {
                dx: 1_150,
                dy: 4,
                dz: 12,
            },
            means: BatchMeans {
                x: -510,
                y: -1,
                z: 996,
            },
            dominant: Some(Channel::FistBump),
            sensitivity: 980,
            accepting_input: true,
            states: [
                AxisState::Idle,
                AxisState::ImpactCandidate,
                AxisState::Idle,
            ],
            promoted_mask: Channel::FistBump.mask(),
            detected_mask: 0,
        };
        let row = format_trace_row(&sample);
        assert_eq!(
            row.as_str(),
            "gesture_trace,400,5,50,-3,1000,1150,4,12,-510,-1,996,fist_bump,980,1,0,2,0,0x02,0x00"
        );
        assert_eq!(
            row.split(',').count(),
            GESTURE_TRACE_HEADER.split(',').count()
        );
    }
}
