//! Outer (non-nested) components
//!
//! A component is outer when it touches the image border or the
//! background region connected to the border. Components sitting inside
//! the hole of another component, such as a dot drawn inside a ring, are
//! nested and are dropped.

use crate::{ConnectedComponent, ConnectivityType, RegionResult, label_components};
use glyphline_core::Pix;
use std::collections::VecDeque;

/// Find the components of a binary image that are not nested in a hole.
///
/// The background is flood-filled from the border using the dual of
/// `connectivity`, so an 8-connected ring closes its hole against a
/// 4-connected background.
pub fn find_outer_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let map = label_components(pix, connectivity)?;
    let (w, h) = (map.width() as i32, map.height() as i32);
    let idx = |x: i32, y: i32| (y * w + x) as usize;

    // background reachable from the border
    let mut outside = vec![false; (w * h) as usize];
    let mut queue = VecDeque::new();
    for y in 0..h {
        for x in 0..w {
            let on_border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            if on_border && map.label(x, y) == 0 {
                outside[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }
    }
    let bg_offsets = connectivity.dual().offsets();
    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in bg_offsets {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                continue;
            }
            if map.label(nx, ny) == 0 && !outside[idx(nx, ny)] {
                outside[idx(nx, ny)] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    let mut is_outer = vec![false; map.components().len() + 1];
    for y in 0..h {
        for x in 0..w {
            let label = map.label(x, y);
            if label == 0 || is_outer[label as usize] {
                continue;
            }
            let on_border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let touches_outside = bg_offsets.iter().any(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                nx >= 0 && ny >= 0 && nx < w && ny < h && outside[idx(nx, ny)]
            });
            if on_border || touches_outside {
                is_outer[label as usize] = true;
            }
        }
    }

    Ok(map
        .into_components()
        .into_iter()
        .filter(|c| is_outer[c.label as usize])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphline_core::{Box, PixMut, PixelDepth};

    fn ring_with_dot() -> Pix {
        let mut pm = PixMut::new(11, 11, PixelDepth::Bit1).unwrap();
        pm.fill_rect(&Box::new_unchecked(1, 1, 9, 9), 1);
        pm.fill_rect(&Box::new_unchecked(3, 3, 5, 5), 0);
        pm.set_pixel(5, 5, 1).unwrap();
        pm.into()
    }

    #[test]
    fn test_nested_dot_dropped() {
        let pix = ring_with_dot();
        let all = crate::find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(all.len(), 2);
        let outer = find_outer_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].bounds, Box::new_unchecked(1, 1, 9, 9));
    }

    #[test]
    fn test_side_by_side_all_outer() {
        let mut pm = PixMut::new(12, 5, PixelDepth::Bit1).unwrap();
        pm.fill_rect(&Box::new_unchecked(1, 1, 3, 3), 1);
        pm.fill_rect(&Box::new_unchecked(6, 1, 3, 3), 1);
        pm.fill_rect(&Box::new_unchecked(10, 0, 2, 5), 1);
        let outer = find_outer_components(&pm.into(), ConnectivityType::EightWay).unwrap();
        assert_eq!(outer.len(), 3);
    }

    #[test]
    fn test_diagonal_gap_keeps_hole_closed() {
        // a diamond outline: 8-connected ring, its interior is a hole
        let mut pm = PixMut::new(9, 9, PixelDepth::Bit1).unwrap();
        for y in 0..9i32 {
            for x in 0..9i32 {
                if (x - 4).abs() + (y - 4).abs() == 3 {
                    pm.set_pixel(x as u32, y as u32, 1).unwrap();
                }
            }
        }
        pm.set_pixel(4, 4, 1).unwrap();
        let pix: Pix = pm.into();
        let all = crate::find_connected_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(all.len(), 2);
        let outer = find_outer_components(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(outer.len(), 1);
    }
}
