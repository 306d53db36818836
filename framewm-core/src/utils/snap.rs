//! Edge snapping for interactive moves and resizes.
use crate::config::{Config, ScreenMetrics};
use crate::models::{Handle, ManagedWindow, Rect, TabMode, WindowHandle};

/// Tighten `dx`/`dy` when an edge of `win` is closer to an edge of
/// `other` than the current best offset. Only opposing edges snap while
/// resizing; a window being grown toward another should meet it, not
/// swallow it.
fn snap_to_rect(dx: &mut i32, dy: &mut i32, win: Rect, other: Rect, resize: bool) {
    let (left, right, top, bottom) = (win.x, win.right(), win.y, win.bottom());
    let (oleft, oright, otop, obottom) = (other.x, other.right(), other.y, other.bottom());

    // left/right edges only count when the windows overlap vertically
    if top <= obottom && bottom >= otop {
        if (left - oleft).abs() < dx.abs() {
            *dx = oleft - left;
        }
        if (right - oleft).abs() < dx.abs() {
            *dx = oleft - right;
        }
        if (left - oright).abs() < dx.abs() {
            *dx = oright - left;
        }
        if !resize && (right - oright).abs() < dx.abs() {
            *dx = oright - right;
        }
    }

    if left <= oright && right >= oleft {
        if (top - otop).abs() < dy.abs() {
            *dy = otop - top;
        }
        if (bottom - otop).abs() < dy.abs() {
            *dy = otop - bottom;
        }
        if (top - obottom).abs() < dy.abs() {
            *dy = obottom - top;
        }
        if !resize && (bottom - obottom).abs() < dy.abs() {
            *dy = obottom - bottom;
        }
    }
}

/// Pull `(left, top)` flush against nearby screen, head, and window
/// edges when within the configured threshold. External tab strips
/// snap too, both the dragged window's and other windows'.
#[allow(clippy::too_many_arguments)]
pub fn do_snapping<H: Handle>(
    cfg: &impl Config,
    screens: &impl ScreenMetrics,
    windows: &[ManagedWindow<H>],
    handle: WindowHandle<H>,
    workspace: usize,
    left: &mut i32,
    top: &mut i32,
    resize: bool,
) {
    let threshold = if resize {
        cfg.edge_resize_snap_threshold()
    } else {
        cfg.edge_snap_threshold()
    };
    if threshold == 0 {
        return;
    }

    let Some(win) = windows.iter().find(|w| w.handle == handle) else {
        return;
    };

    // best offsets so far; anything <= threshold wins
    let mut dx = threshold + 1;
    let mut dy = threshold + 1;

    let bw = win.frame.border_width() as i32;
    let body = Rect::new(
        *left,
        *top,
        win.frame.width() + 2 * bw,
        win.frame.height() + 2 * bw,
    );

    let tabbed = win.frame.tab_mode() == TabMode::External && win.frame.use_tabs;
    let tab_box = Rect::new(
        body.x - win.frame.x_offset(cfg),
        body.y - win.frame.y_offset(cfg),
        body.w + win.frame.width_offset(cfg),
        body.h + win.frame.height_offset(cfg),
    );

    for head in 0..screens.head_count() {
        for target in [screens.usable_rect(head), screens.head_rect(head)] {
            snap_to_rect(&mut dx, &mut dy, body, target, resize);
            if tabbed {
                snap_to_rect(&mut dx, &mut dy, tab_box, target, resize);
            }
        }
    }

    for other in windows {
        if other.handle == handle || !other.frame.visible || !other.on_workspace(workspace) {
            continue;
        }
        let obw = other.frame.border_width() as i32;
        let other_body = Rect::new(
            other.frame.x(),
            other.frame.y(),
            other.frame.width() + 2 * obw,
            other.frame.height() + 2 * obw,
        );

        snap_to_rect(&mut dx, &mut dy, body, other_body, resize);
        if tabbed {
            snap_to_rect(&mut dx, &mut dy, tab_box, other_body, resize);
        }

        // snap to the box containing the other window's tabs as well;
        // individual tab edges are too dynamic to be worth chasing
        if other.frame.tab_mode() == TabMode::External && other.frame.use_tabs {
            let other_box = Rect::new(
                other_body.x - other.frame.x_offset(cfg),
                other_body.y - other.frame.y_offset(cfg),
                other_body.w + other.frame.width_offset(cfg),
                other_body.h + other.frame.height_offset(cfg),
            );
            snap_to_rect(&mut dx, &mut dy, body, other_box, resize);
            if tabbed {
                snap_to_rect(&mut dx, &mut dy, tab_box, other_box, resize);
            }
        }
    }

    if dx <= threshold {
        *left += dx;
    }
    if dy <= threshold {
        *top += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::models::{mock_frame, Screens};

    fn window(id: i32, rect: Rect) -> ManagedWindow<crate::models::MockHandle> {
        let mut frame = mock_frame(rect);
        frame.visible = true;
        ManagedWindow::new(WindowHandle(id), frame)
    }

    fn setup() -> (TestConfig, Screens, Vec<ManagedWindow<crate::models::MockHandle>>) {
        let cfg = TestConfig::default();
        let screens = Screens::single(1920, 1080);
        let windows = vec![
            window(1, Rect::new(500, 500, 300, 200)),
            window(2, Rect::new(100, 100, 300, 200)),
        ];
        (cfg, screens, windows)
    }

    #[test]
    fn edges_within_threshold_pull_flush() {
        let (cfg, screens, windows) = setup();
        // 8px right of the other window's right edge at x=400
        let (mut left, mut top) = (408, 150);
        do_snapping(&cfg, &screens, &windows, WindowHandle(1), 0, &mut left, &mut top, false);
        assert_eq!(left, 400);
        // top edges 50px apart are beyond the threshold
        assert_eq!(top, 150);
    }

    #[test]
    fn edges_beyond_threshold_stay_put() {
        let (cfg, screens, windows) = setup();
        let (mut left, mut top) = (412, 500);
        do_snapping(&cfg, &screens, &windows, WindowHandle(1), 0, &mut left, &mut top, false);
        assert_eq!((left, top), (412, 500));
    }

    #[test]
    fn screen_edges_snap_too() {
        let (cfg, screens, windows) = setup();
        let (mut left, mut top) = (4, 874);
        do_snapping(&cfg, &screens, &windows, WindowHandle(1), 0, &mut left, &mut top, false);
        assert_eq!(left, 0);
        // the 200px-tall body ends up flush with the 1080px screen bottom
        assert_eq!(top, 880);
    }

    #[test]
    fn other_workspace_windows_are_invisible_to_snapping() {
        let (cfg, screens, mut windows) = setup();
        windows[1].workspace = 3;
        let (mut left, mut top) = (408, 500);
        do_snapping(&cfg, &screens, &windows, WindowHandle(1), 0, &mut left, &mut top, false);
        assert_eq!(left, 408);
        let _ = top;
    }

    #[test]
    fn zero_threshold_disables_snapping() {
        let (mut cfg, screens, windows) = setup();
        cfg.edge_snap_threshold = 0;
        let (mut left, mut top) = (401, 101);
        do_snapping(&cfg, &screens, &windows, WindowHandle(1), 0, &mut left, &mut top, false);
        assert_eq!((left, top), (401, 101));
    }
}
