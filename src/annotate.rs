//! The annotation engine.
//!
//! Recomputes, after every board mutation, two observer-relative overlays
//! of per-cell markers plus the list of move origins able to enter each
//! cell. Markers drive both move legality ("did this cell become
//! reachable this turn") and observer-facing visuals. The passes are
//! strictly ordered so later ones see earlier results: pending-placement
//! candidates, then board movers (first-writer-wins within a view), then
//! influence, which upgrades reachable cells and fills unmarked ones.

use crate::board::{Board, Coord, Faction, PlacementKind};

/// A per-cell, per-observer annotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A legal move destination for the observer's faction this turn.
    Reachable,
    /// Reachable, and inside the observer's own area of influence.
    ReachableFriendly,
    /// Reachable, and inside the opponent's area of influence.
    ReachableEnemy,
    /// Inside the observer's own area of influence only.
    FriendlyInfluence,
    /// Inside the opponent's area of influence only.
    EnemyInfluence,
}

impl Marker {
    /// Whether the marker still denotes a legal destination.
    pub const fn is_reachable(self) -> bool {
        matches!(
            self,
            Marker::Reachable | Marker::ReachableFriendly | Marker::ReachableEnemy
        )
    }
}

/// A mover able to enter a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A token on the board at this coordinate.
    Board(Coord),
    /// The hunter's pending off-board placement ghost.
    Placement,
}

/// One observer's marker overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    size: usize,
    markers: Vec<Option<Marker>>,
}

impl Overlay {
    fn empty(size: usize) -> Self {
        Overlay {
            size,
            markers: vec![None; size * size],
        }
    }

    fn index(&self, at: Coord) -> Option<usize> {
        (at.row < self.size && at.col < self.size).then(|| at.row * self.size + at.col)
    }

    /// The marker at `at`, if any.
    pub fn marker(&self, at: Coord) -> Option<Marker> {
        self.index(at).and_then(|i| self.markers[i])
    }

    /// Marks `at` reachable unless a marker already claimed it.
    fn mark_reachable(&mut self, at: Coord) {
        if let Some(i) = self.index(at) {
            if self.markers[i].is_none() {
                self.markers[i] = Some(Marker::Reachable);
            }
        }
    }

    /// Applies own-faction influence: upgrades a plain reachable marker,
    /// fills an unmarked cell, leaves anything else alone.
    fn absorb_friendly_influence(&mut self, at: Coord) {
        if let Some(i) = self.index(at) {
            match self.markers[i] {
                Some(Marker::Reachable) => self.markers[i] = Some(Marker::ReachableFriendly),
                None => self.markers[i] = Some(Marker::FriendlyInfluence),
                _ => {}
            }
        }
    }

    /// The mirrored update for the opposing observer.
    fn absorb_enemy_influence(&mut self, at: Coord) {
        if let Some(i) = self.index(at) {
            match self.markers[i] {
                Some(Marker::Reachable) => self.markers[i] = Some(Marker::ReachableEnemy),
                None => self.markers[i] = Some(Marker::EnemyInfluence),
                _ => {}
            }
        }
    }
}

/// Both observers' overlays plus per-cell move origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotations {
    size: usize,
    survivor: Overlay,
    hunter: Overlay,
    origins: Vec<Vec<(Faction, Origin)>>,
}

impl Annotations {
    /// A fully cleared annotation state, as shown once a match is over.
    pub fn empty(size: usize) -> Self {
        Annotations {
            size,
            survivor: Overlay::empty(size),
            hunter: Overlay::empty(size),
            origins: vec![Vec::new(); size * size],
        }
    }

    /// Recomputes all overlays for the current board.
    ///
    /// `active` is the faction holding the turn, or `None` once the match
    /// is terminal, in which case everything stays cleared.
    pub fn compute(board: &Board, active: Option<Faction>, pending: PlacementKind) -> Self {
        let mut ann = Annotations::empty(board.size());
        let Some(active) = active else {
            return ann;
        };

        // Pending-placement pass: candidates are recorded for move
        // resolution on every turn, marked only on the hunter's.
        for dest in pending.candidates(board) {
            ann.record(dest, Faction::Hunter, Origin::Placement);
            if active == Faction::Hunter {
                ann.hunter.mark_reachable(dest);
            }
        }

        // Mover pass: each token's candidates mark its own faction's view
        // when that faction has the turn.
        for (at, token) in board.cells() {
            let Some(faction) = token.faction() else {
                continue;
            };
            for dest in token.candidate_moves(board, at) {
                ann.record(dest, faction, Origin::Board(at));
                if active == faction {
                    ann.view_mut(faction).mark_reachable(dest);
                }
            }
        }

        // Influence pass: both views updated with faction-relative
        // priority, independent of whose turn it is.
        for (at, token) in board.cells() {
            let Some(faction) = token.faction() else {
                continue;
            };
            for cell in token.candidate_influence(board, at) {
                ann.view_mut(faction).absorb_friendly_influence(cell);
                ann.view_mut(faction.opponent()).absorb_enemy_influence(cell);
            }
        }

        ann
    }

    /// The overlay seen by the given faction.
    pub fn view(&self, faction: Faction) -> &Overlay {
        match faction {
            Faction::Survivor => &self.survivor,
            Faction::Hunter => &self.hunter,
        }
    }

    fn view_mut(&mut self, faction: Faction) -> &mut Overlay {
        match faction {
            Faction::Survivor => &mut self.survivor,
            Faction::Hunter => &mut self.hunter,
        }
    }

    /// The movers able to enter `at`, in annotation order.
    pub fn origins(&self, at: Coord) -> &[(Faction, Origin)] {
        match self.survivor.index(at) {
            Some(i) => &self.origins[i],
            None => &[],
        }
    }

    fn record(&mut self, at: Coord, faction: Faction, origin: Origin) {
        if let Some(i) = self.survivor.index(at) {
            self.origins[i].push((faction, origin));
        }
    }
}
