//! Screen render pipeline
//!
//! Draws the scene as a zoomed grid visualization on the display. The grid
//! is shown one 16x8 page at a time: page 0 holds rows 0-7, page 1 rows
//! 8-15. Full mode uses the whole display; edit mode uses a smaller cell
//! size on the top six lines and adds widget outlines and an info panel
//! describing the editor selection.

use gridline_display::{DisplayLines, FontExt, FontRenderer};

use crate::config::GRID_MAX_DIMENSION;
use crate::controller::GridController;
use crate::geometry::{fill, CellBuffer, FillLevel};
use crate::render::glyphs::{glyph_pixel, outline_parts, GLYPH_SIZE};
use crate::render::{compose, visible};
use crate::scene::Scene;

/// Columns of the screen cell buffer
pub const SCREEN_COLUMNS: usize = GRID_MAX_DIMENSION as usize;

/// Rows per page
pub const SCREEN_ROWS: usize = GRID_MAX_DIMENSION as usize / 2;

const EMPTY_CELL_LEVEL: u8 = 1;
const OUTLINE_LEVEL: u8 = 10;
const ICON_ON: u8 = 10;
const ICON_OFF: u8 = 1;
const DASH_BRIGHT: u8 = 15;
const DASH_DIM: u8 = 4;
const LABEL_LEVEL: u8 = 1;
const VALUE_LEVEL: u8 = 8;
const VALUE_RIGHT: u16 = 117;
const DIVIDER_X: usize = 119;

/// Which half of the grid is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Rows 0-7
    #[default]
    Top,
    /// Rows 8-15
    Bottom,
}

impl Page {
    /// First grid row on this page
    pub fn first_row(self) -> u8 {
        match self {
            Page::Top => 0,
            Page::Bottom => SCREEN_ROWS as u8,
        }
    }
}

/// Visualization style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenMode {
    /// Whole display, 8 pixel cells
    Full,
    /// Top six lines, 6 pixel cells, outlines and info panel
    Edit,
}

/// Pixel layout of a mode
#[derive(Clone, Copy)]
struct Layout {
    cell: u16,
    block: u16,
    left: u16,
    lines: usize,
    /// Pixels trimmed from the far selection edges
    inset: u16,
}

impl Layout {
    fn for_mode(mode: ScreenMode) -> Self {
        match mode {
            ScreenMode::Full => Self {
                cell: 8,
                block: 5,
                left: 0,
                lines: 8,
                inset: 2,
            },
            ScreenMode::Edit => Self {
                cell: 6,
                block: 4,
                left: 10,
                lines: 6,
                inset: 1,
            },
        }
    }
}

/// Editor selection, given by two opposite corners in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    pub x1: u8,
    pub y1: u8,
    pub x2: u8,
    pub y2: u8,
}

impl Selection {
    pub const fn new(x1: u8, y1: u8, x2: u8, y2: u8) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Corners as (min x, min y, max x, max y), clamped to the grid
    pub fn bounds(&self) -> (u8, u8, u8, u8) {
        let last = GRID_MAX_DIMENSION - 1;
        (
            self.x1.min(self.x2).min(last),
            self.y1.min(self.y2).min(last),
            self.x1.max(self.x2).min(last),
            self.y1.max(self.y2).min(last),
        )
    }

    /// Top-left cell
    pub fn origin(&self) -> (u8, u8) {
        let (x, y, _, _) = self.bounds();
        (x, y)
    }

    /// Width and height in cells
    pub fn size(&self) -> (u8, u8) {
        let (x1, y1, x2, y2) = self.bounds();
        (x2 - x1 + 1, y2 - y1 + 1)
    }
}

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenRequest {
    pub mode: ScreenMode,
    pub page: Page,
    /// Draw widget outlines (edit mode only)
    pub outlines: bool,
    pub selection: Selection,
}

/// One page of the grid as cell levels, indexed `[x][y]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenCells {
    cells: [[u8; SCREEN_ROWS]; SCREEN_COLUMNS],
}

impl Default for ScreenCells {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenCells {
    pub const fn new() -> Self {
        Self {
            cells: [[0; SCREEN_ROWS]; SCREEN_COLUMNS],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[0; SCREEN_ROWS]; SCREEN_COLUMNS];
    }

    /// Cell at page-local coordinates, 0 outside the page
    pub fn get(&self, x: u8, y: u8) -> u8 {
        self.cells
            .get(x as usize)
            .and_then(|column| column.get(y as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Fill target that takes grid coordinates and keeps only this page
    pub fn page(&mut self, page: Page) -> PageView<'_> {
        PageView {
            cells: self,
            first_row: page.first_row(),
        }
    }
}

/// The 16x16 grid seen through one page of [`ScreenCells`]
pub struct PageView<'a> {
    cells: &'a mut ScreenCells,
    first_row: u8,
}

impl CellBuffer for PageView<'_> {
    fn width(&self) -> u8 {
        GRID_MAX_DIMENSION
    }

    fn height(&self) -> u8 {
        GRID_MAX_DIMENSION
    }

    fn cell_mut(&mut self, x: u8, y: u8) -> Option<&mut u8> {
        let row = y.checked_sub(self.first_row)?;
        self.cells.cells.get_mut(x as usize)?.get_mut(row as usize)
    }
}

fn dash(coordinate: u16, inverted: bool) -> u8 {
    if (coordinate & 1 == 1) != inverted {
        DASH_DIM
    } else {
        DASH_BRIGHT
    }
}

impl GridController {
    /// Render the scene visualization into the display lines
    pub fn render_screen<F: FontRenderer>(&mut self, scene: &mut Scene, request: ScreenRequest, font: &mut F) -> &DisplayLines {
        let layout = Layout::for_mode(request.mode);

        self.draw_cells(scene, request.page, layout);
        self.draw_selection(&request, layout);

        if request.mode == ScreenMode::Edit {
            if request.outlines {
                self.draw_outlines(scene, request.page);
            }
            self.draw_info(scene, &request, font);
        }

        scene.screen_dirty = false;
        &self.lines
    }

    /// Compose one page and draw each cell as a block
    fn draw_cells(&mut self, scene: &Scene, page: Page, layout: Layout) {
        self.cells.clear();
        compose(scene, &mut self.cells.page(page));

        let first_row = page.first_row();
        for (x, column) in self.cells.cells.iter_mut().enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                *cell = scene.overlay(x as u8, y as u8 + first_row).apply(*cell);
            }
        }

        self.lines.clear_lines(layout.lines);

        let Layout { cell, block, left, .. } = layout;
        for (x, column) in self.cells.cells.iter().enumerate() {
            for (y, &level) in column.iter().enumerate() {
                for j in 0..block {
                    let py = y as u16 * cell + j + 1;
                    for i in 0..block {
                        let px = left + x as u16 * cell + i + 1;
                        let edge = i == 0 || j == 0 || i == block - 1 || j == block - 1;
                        if level != 0 {
                            self.lines.set_pixel(px as usize, py as usize, level);
                        } else if edge {
                            self.lines.set_pixel(px as usize, py as usize, EMPTY_CELL_LEVEL);
                        }
                    }
                }
            }
        }
    }

    /// Dashed border around the selection, clipped to the page
    fn draw_selection(&mut self, request: &ScreenRequest, layout: Layout) {
        let Layout { cell, left, inset, .. } = layout;
        let (min_x, min_y, max_x, max_y) = request.selection.bounds();

        let x1 = min_x as u16 * cell;
        let x2 = (max_x as u16 + 1) * cell - inset;
        let mut y1 = min_y as u16 * cell;
        let mut y2 = (max_y as u16 + 1) * cell - inset;

        let page_height = cell * SCREEN_ROWS as u16;
        let (mut show_top, mut show_bottom) = (true, true);
        match request.page {
            Page::Top => {
                if y1 >= page_height {
                    return;
                }
                if y2 >= page_height {
                    show_bottom = false;
                    y2 = page_height - 1;
                }
            }
            Page::Bottom => {
                if y2 < page_height {
                    return;
                }
                if y1 < page_height {
                    show_top = false;
                    y1 = page_height;
                }
                y1 -= page_height;
                y2 -= page_height;
            }
        }

        // Edit mode alternates the far edges in the opposite phase
        let far_inverted = request.mode == ScreenMode::Edit;
        let mut set = |x: u16, y: u16, level: u8| self.lines.set_pixel((left + x) as usize, y as usize, level);

        if show_top {
            for x in x1..=x2 {
                set(x, y1, dash(x, false));
            }
        }
        if show_bottom {
            for x in x1 + 1..=x2 {
                set(x, y2, dash(x, far_inverted));
            }
        }
        for y in y1..=y2 {
            set(x1, y, dash(y, false));
            set(x2, y, dash(y, far_inverted));
        }
    }

    /// Outline glyphs for every visible button and fader
    fn draw_outlines(&mut self, scene: &Scene, page: Page) {
        self.cells.clear();
        {
            let mut view = self.cells.page(page);
            let buttons = scene.buttons.iter().map(|button| &button.placement);
            let faders = scene.faders.iter().map(|fader| &fader.placement);
            for placement in buttons.chain(faders).filter(|p| visible(scene, p)) {
                for (rect, part) in outline_parts(placement.rect()) {
                    fill(&mut view, rect, FillLevel::Level(part.code()));
                }
            }
        }

        let left = Layout::for_mode(ScreenMode::Edit).left as usize;
        let width = SCREEN_COLUMNS * GLYPH_SIZE;
        let height = SCREEN_ROWS * GLYPH_SIZE;
        for y in 0..height {
            for x in 0..width {
                let code = self.cells.get((x / GLYPH_SIZE) as u8, (y / GLYPH_SIZE) as u8);
                if glyph_pixel(code, x % GLYPH_SIZE, y % GLYPH_SIZE) {
                    self.lines.set_pixel(left + x, y, OUTLINE_LEVEL);
                }
            }
        }
    }

    /// Selection readout, divider and page/rotation icons
    fn draw_info<F: FontRenderer>(&mut self, scene: &Scene, request: &ScreenRequest, font: &mut F) {
        let (x, y) = request.selection.origin();
        let (w, h) = request.selection.size();

        let rows: [(usize, char, u16, u8); 5] = [
            (0, 'G', 127, scene.current_group),
            (2, 'X', 127, x),
            (3, 'Y', 127, y),
            (4, 'W', 128, w),
            (5, 'H', 127, h),
        ];
        for (index, label, label_right, value) in rows {
            if let Some(line) = self.lines.line_mut(index) {
                font.draw_label_right(line, label, label_right, LABEL_LEVEL);
                font.draw_decimal_right(line, value as u16, VALUE_RIGHT, VALUE_LEVEL);
            }
        }

        for j in (0..9).step_by(2).chain((17..48).step_by(2)) {
            self.lines.set_pixel(DIVIDER_X, j, 1);
        }

        self.draw_page_icon(request.page);
        self.draw_rotate_icon(scene.rotate);
    }

    /// Two stacked boxes with the shown half lit
    fn draw_page_icon(&mut self, page: Page) {
        let (top, bottom) = match page {
            Page::Top => (ICON_ON, ICON_OFF),
            Page::Bottom => (ICON_OFF, ICON_ON),
        };
        let lines = &mut self.lines;
        match page {
            Page::Top => {
                for i in 0..5 {
                    lines.set_pixel(i, 0, top);
                    lines.set_pixel(i, 1, top);
                    lines.set_pixel(i, 4, bottom);
                }
                for y in 2..4 {
                    lines.set_pixel(0, y, bottom);
                    lines.set_pixel(4, y, bottom);
                }
            }
            Page::Bottom => {
                for i in 0..5 {
                    lines.set_pixel(i, 0, top);
                    lines.set_pixel(i, 3, bottom);
                    lines.set_pixel(i, 4, bottom);
                }
                for y in 1..3 {
                    lines.set_pixel(0, y, top);
                    lines.set_pixel(4, y, top);
                }
            }
        }
    }

    /// Arrow icon on the second line, lit while the grid is rotated
    fn draw_rotate_icon(&mut self, rotated: bool) {
        const ARROW: [(usize, usize); 11] = [
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (0, 2),
            (2, 2),
            (4, 2),
            (1, 3),
            (2, 3),
            (3, 3),
            (2, 4),
        ];
        let level = if rotated { ICON_ON } else { ICON_OFF };
        for (x, y) in ARROW {
            self.lines.set_pixel(x, 8 + y, level);
        }
    }
}
