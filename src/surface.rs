//! Display collaborator and placement clipping.

use core::ops::Range;

/// A rectangular RGB565 pixel sink, typically an SPI TFT.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Write a horizontal run of pixels starting at `(x, y)`.
    ///
    /// The reader pre-clips, so the run always lies inside the surface.
    fn write_run(&mut self, x: u32, y: u32, pixels: &[u16]);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn write_run(&mut self, x: u32, y: u32, pixels: &[u16]) {
        (**self).write_run(x, y, pixels);
    }
}

/// The part of an image that lands on a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Clip {
    /// Visible image columns.
    pub cols: Range<u32>,
    /// Visible image rows, in display order.
    pub rows: Range<u32>,
    /// Surface coordinate of the first visible pixel.
    pub dest_x: u32,
    pub dest_y: u32,
}

/// Intersect a `width` x `height` image placed at `(x, y)` with a surface.
/// `None` when nothing is visible.
pub(crate) fn clip(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    surface_width: u32,
    surface_height: u32,
) -> Option<Clip> {
    let (cols, dest_x) = clip_axis(x, width, surface_width)?;
    let (rows, dest_y) = clip_axis(y, height, surface_height)?;
    Some(Clip {
        cols,
        rows,
        dest_x,
        dest_y,
    })
}

fn clip_axis(pos: i32, len: u32, bound: u32) -> Option<(Range<u32>, u32)> {
    let start = i64::from(pos).max(0);
    let end = (i64::from(pos) + i64::from(len)).min(i64::from(bound));
    if start >= end {
        return None;
    }
    let first = (start - i64::from(pos)) as u32;
    let last = (end - i64::from(pos)) as u32;
    Some((first..last, start as u32))
}
