use super::types::{Channel, Sample};

/// Absolute first-to-last change per axis over one batch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EndpointDeltas {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

/// Per-axis integer mean over one batch, truncated toward zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchMeans {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

pub fn endpoint_deltas(samples: &[Sample]) -> EndpointDeltas {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return EndpointDeltas::default();
    };
    EndpointDeltas {
        dx: (i32::from(last.x) - i32::from(first.x)).abs(),
        dy: (i32::from(last.y) - i32::from(first.y)).abs(),
        dz: (i32::from(last.z) - i32::from(first.z)).abs(),
    }
}

pub fn batch_means(samples: &[Sample]) -> BatchMeans {
    if samples.is_empty() {
        return BatchMeans::default();
    }
    let (sx, sy, sz) = samples.iter().fold((0i32, 0i32, 0i32), |(sx, sy, sz), s| {
        (
            sx + i32::from(s.x),
            sy + i32::from(s.y),
            sz + i32::from(s.z),
        )
    });
    let n = samples.len() as i32;
    BatchMeans {
        x: sx / n,
        y: sy / n,
        z: sz / n,
    }
}

/// Channel whose impact axis moved strictly more than both other axes and
/// strictly more than `sensitivity`. Ties pick nothing.
pub fn dominant_channel(deltas: EndpointDeltas, sensitivity: i32) -> Option<Channel> {
    let EndpointDeltas { dx, dy, dz } = deltas;
    if dx > sensitivity && dx > dy && dx > dz {
        Some(Channel::FistBump)
    } else if dz > sensitivity && dz > dx && dz > dy {
        Some(Channel::HighFive)
    } else if dy > sensitivity && dy > dx && dy > dz {
        Some(Channel::Shake)
    } else {
        None
    }
}
