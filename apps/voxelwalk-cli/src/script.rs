use anyhow::{Context, bail};
use glam::Vec3;
use voxelwalk_input::{InputEvent, InputRouter, Key, MouseButton};

/// Longest script accepted, in frames, after repeats are expanded.
pub const MAX_SCRIPT_FRAMES: usize = 1_000_000;

/// Scripted input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held: Vec<Key>,
    pub right_click: bool,
    /// Left-drag pointer delta in pixels.
    pub drag: Option<(f32, f32)>,
    /// Hand placement of the point light.
    pub light: Option<Vec3>,
}

/// Parse a session script.
///
/// Frames are separated by `,` and tokens within a frame by `+`. A token is a
/// key name (`w`, `space`, `shift`, ...), `rmb` for a right click,
/// `drag:DX:DY` for a left-drag, or `light:X:Y:Z` to place the point light.
/// An empty frame holds nothing. A frame may be repeated with a `*N` suffix,
/// e.g. `w*30`. The expanded script may not
/// exceed [`MAX_SCRIPT_FRAMES`].
pub fn parse_script(script: &str) -> anyhow::Result<Vec<FrameInput>> {
    let mut frames = Vec::new();
    for raw in script.split(',') {
        let raw = raw.trim();
        let (body, repeat) = match raw.rsplit_once('*') {
            Some((body, n)) => {
                let n: usize = n
                    .trim()
                    .parse()
                    .with_context(|| format!("bad repeat count in frame {raw:?}"))?;
                (body, n)
            }
            None => (raw, 1),
        };
        if repeat > MAX_SCRIPT_FRAMES - frames.len() {
            bail!("script longer than {MAX_SCRIPT_FRAMES} frames at {raw:?}");
        }
        let frame = parse_frame(body)?;
        frames.extend(std::iter::repeat_n(frame, repeat));
    }
    Ok(frames)
}

fn parse_frame(body: &str) -> anyhow::Result<FrameInput> {
    let mut frame = FrameInput::default();
    for token in body.split('+').map(str::trim).filter(|t| !t.is_empty()) {
        if token.eq_ignore_ascii_case("rmb") {
            frame.right_click = true;
        } else if let Some(delta) = token.strip_prefix("drag:") {
            let Some((dx, dy)) = delta.split_once(':') else {
                bail!("drag needs DX:DY, got {token:?}");
            };
            let dx: f32 = dx.parse().with_context(|| format!("bad drag dx in {token:?}"))?;
            let dy: f32 = dy.parse().with_context(|| format!("bad drag dy in {token:?}"))?;
            frame.drag = Some((dx, dy));
        } else if let Some(position) = token.strip_prefix("light:") {
            let coords = position
                .split(':')
                .map(|c| c.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("bad light position in {token:?}"))?;
            let [x, y, z] = coords[..] else {
                bail!("light needs X:Y:Z, got {token:?}");
            };
            frame.light = Some(Vec3::new(x, y, z));
        } else {
            match Key::from_name(token) {
                Some(key) => frame.held.push(key),
                None => bail!("unknown key {token:?}"),
            }
        }
    }
    Ok(frame)
}

/// Feed one scripted frame to the router as raw events.
///
/// Keys held in the previous frame but not this one are released first.
pub fn feed(router: &mut InputRouter, previous: &[Key], frame: &FrameInput) {
    for key in previous.iter().filter(|k| !frame.held.contains(k)) {
        router.handle_event(InputEvent::KeyUp(*key));
    }
    for key in &frame.held {
        router.handle_event(InputEvent::KeyDown(*key));
    }
    if frame.right_click {
        router.handle_event(InputEvent::ButtonDown(MouseButton::Right));
        router.handle_event(InputEvent::ButtonUp(MouseButton::Right));
    }
    if let Some((dx, dy)) = frame.drag {
        router.handle_event(InputEvent::ButtonDown(MouseButton::Left));
        router.handle_event(InputEvent::PointerMoved { dx, dy });
        router.handle_event(InputEvent::ButtonUp(MouseButton::Left));
    }
}
