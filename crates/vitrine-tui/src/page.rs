//! Page geometry: the fixed vertical sequence of sections on a virtual
//! row grid
//!
//! Every section gets a `[top, top + height)` row span; the viewport is a
//! sliding window over the grid driven by the scroll offset. Animation
//! scopes anchor at section tops, so the layout is the single source of
//! geometry for both rendering and scroll triggers.

/// Extra scroll rows during which the dashboard stays pinned on screen
pub fn pin_rows(viewport: u16) -> u16 {
    viewport / 2
}

/// The sections of the page, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Dashboard,
    Features,
    Philosophy,
    Testimonials,
    Account,
    Cta,
    Footer,
}

impl Section {
    pub const ORDER: [Section; 8] = [
        Section::Hero,
        Section::Dashboard,
        Section::Features,
        Section::Philosophy,
        Section::Testimonials,
        Section::Account,
        Section::Cta,
        Section::Footer,
    ];

    /// Row height for a given viewport height
    ///
    /// Full-screen sections track the viewport with a floor for small
    /// terminals; the dashboard adds its pinned scroll range on top.
    fn height(self, viewport: u16) -> u16 {
        match self {
            Section::Hero => viewport.max(24),
            Section::Dashboard => viewport.max(30) + pin_rows(viewport),
            Section::Features => (viewport * 3 / 4).max(30),
            Section::Philosophy => (viewport * 4 / 5).max(20),
            Section::Testimonials => viewport.max(24),
            Section::Account => viewport.max(28),
            Section::Cta => (viewport * 4 / 5).max(20),
            Section::Footer => (viewport / 2).max(16),
        }
    }
}

/// One section's span on the row grid
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub section: Section,
    pub top: u16,
    pub height: u16,
}

/// A section slice currently on screen
#[derive(Debug, Clone, Copy)]
pub struct VisibleSlot {
    pub slot: Slot,
    /// Screen row the slice starts at
    pub screen_top: u16,
    /// Rows of the section on screen
    pub rows: u16,
    /// Section rows clipped off above the screen
    pub cut: u16,
}

/// The computed row grid for one terminal size
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width: u16,
    pub viewport: u16,
    slots: [Slot; Section::ORDER.len()],
    total: u16,
}

impl PageLayout {
    pub fn compute(width: u16, viewport: u16) -> Self {
        let mut slots = [Slot {
            section: Section::Hero,
            top: 0,
            height: 0,
        }; Section::ORDER.len()];
        let mut top = 0u16;
        for (slot, section) in slots.iter_mut().zip(Section::ORDER) {
            let height = section.height(viewport);
            *slot = Slot {
                section,
                top,
                height,
            };
            top = top.saturating_add(height);
        }
        Self {
            width,
            viewport,
            slots,
            total: top,
        }
    }

    /// Total page height in rows
    pub fn total(&self) -> u16 {
        self.total
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> u16 {
        self.total.saturating_sub(self.viewport)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, section: Section) -> Slot {
        self.slots[Section::ORDER
            .iter()
            .position(|s| *s == section)
            .unwrap_or(0)]
    }

    /// Row the section's animation scope anchors at
    pub fn anchor(&self, section: Section) -> u16 {
        self.slot(section).top
    }

    /// Whether any row of the section is inside the viewport
    pub fn is_visible(&self, section: Section, scroll: u16) -> bool {
        let slot = self.slot(section);
        let bottom = scroll.saturating_add(self.viewport);
        slot.top < bottom && slot.top + slot.height > scroll
    }

    /// The section slices on screen at a scroll offset, top to bottom
    pub fn visible(&self, scroll: u16) -> Vec<VisibleSlot> {
        let bottom = scroll.saturating_add(self.viewport);
        self.slots
            .iter()
            .filter(|slot| slot.top < bottom && slot.top + slot.height > scroll)
            .map(|slot| {
                let cut = scroll.saturating_sub(slot.top);
                let screen_top = slot.top.saturating_sub(scroll);
                let rows = (slot.height - cut).min(self.viewport - screen_top);
                VisibleSlot {
                    slot: *slot,
                    screen_top,
                    rows,
                    cut,
                }
            })
            .collect()
    }
}
