//! The `Market` arena: typed collections of residents, dwellings and
//! neighbourhoods, plus the only functions allowed to change who lives where.
//!
//! # Ownership invariant
//!
//! For every housed resident `r`, `dwellings[r.dwelling].owner == Some(r.id)`
//! and `r.neighbourhood == Some(dwellings[r.dwelling].neighbourhood)`; for
//! every owned dwelling `d`, `residents[d.owner].dwelling == Some(d.id)`.
//! [`occupy`](Market::occupy), [`vacate`](Market::vacate) and
//! [`exchange`](Market::exchange) preserve it and panic on a call that would
//! break it. A violation is a programming error, not an economic outcome.

use hm_core::{DwellingId, GeoPoint, NeighbourhoodId, ResidentId};

use crate::{Dwelling, Neighbourhood, Preferences, Resident, UtilityModel};

pub struct Market {
    /// Indexed by `ResidentId`.  Append-only.
    pub residents:      Vec<Resident>,
    /// Indexed by `DwellingId`.  Append-only.
    pub dwellings:      Vec<Dwelling>,
    /// Indexed by `NeighbourhoodId`.  Fixed after setup.
    pub neighbourhoods: Vec<Neighbourhood>,
    pub utility:        UtilityModel,
}

impl Market {
    pub fn new(neighbourhoods: Vec<Neighbourhood>, utility: UtilityModel) -> Self {
        Self {
            residents: Vec::new(),
            dwellings: Vec::new(),
            neighbourhoods,
            utility,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn resident(&self, id: ResidentId) -> &Resident {
        &self.residents[id.index()]
    }

    #[inline]
    pub fn resident_mut(&mut self, id: ResidentId) -> &mut Resident {
        &mut self.residents[id.index()]
    }

    #[inline]
    pub fn dwelling(&self, id: DwellingId) -> &Dwelling {
        &self.dwellings[id.index()]
    }

    #[inline]
    pub fn dwelling_mut(&mut self, id: DwellingId) -> &mut Dwelling {
        &mut self.dwellings[id.index()]
    }

    #[inline]
    pub fn neighbourhood(&self, id: NeighbourhoodId) -> &Neighbourhood {
        &self.neighbourhoods[id.index()]
    }

    #[inline]
    pub fn neighbourhood_mut(&mut self, id: NeighbourhoodId) -> &mut Neighbourhood {
        &mut self.neighbourhoods[id.index()]
    }

    pub fn population(&self) -> usize {
        self.residents.len()
    }

    pub fn unit_count(&self) -> usize {
        self.dwellings.len()
    }

    pub fn homeless_count(&self) -> usize {
        self.residents.iter().filter(|r| r.is_homeless()).count()
    }

    /// Every resident currently seeking, in id order.
    pub fn seekers(&self) -> Vec<ResidentId> {
        self.residents.iter().filter(|r| r.seeking).map(|r| r.id).collect()
    }

    /// Seeking residents who own a dwelling (auction participants).
    pub fn housed_seekers(&self) -> Vec<ResidentId> {
        self.residents
            .iter()
            .filter(|r| r.seeking && !r.is_homeless())
            .map(|r| r.id)
            .collect()
    }

    pub fn vacant_dwellings(&self) -> Vec<DwellingId> {
        self.dwellings.iter().filter(|d| d.is_vacant()).map(|d| d.id).collect()
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Build a vacant unit in `neighbourhood` and register it there.
    pub fn add_dwelling(&mut self, neighbourhood: NeighbourhoodId, price: f64, location: GeoPoint) -> DwellingId {
        let id = DwellingId(self.dwellings.len() as u32);
        self.dwellings.push(Dwelling {
            id,
            neighbourhood,
            price,
            owner: None,
            location,
        });
        self.neighbourhoods[neighbourhood.index()].units.push(id);
        id
    }

    /// Add a homeless resident.  Contentment starts at 0 and the resident is
    /// seeking.
    pub fn add_resident(&mut self, prefs: Preferences, salary: f64, cash: f64) -> ResidentId {
        let id = ResidentId(self.residents.len() as u32);
        self.residents.push(Resident {
            id,
            prefs,
            salary,
            cash,
            dwelling:      None,
            neighbourhood: None,
            contentment:   0.0,
            seeking:       true,
            location:      GeoPoint::ORIGIN,
        });
        id
    }

    // ── Ownership primitives ──────────────────────────────────────────────

    /// Link a homeless resident to a vacant dwelling.
    ///
    /// # Panics
    /// If the resident already owns a dwelling or the dwelling has an owner.
    pub fn occupy(&mut self, resident: ResidentId, dwelling: DwellingId) {
        let d = &mut self.dwellings[dwelling.index()];
        assert!(d.owner.is_none(), "{dwelling} is already owned by {:?}", d.owner);
        let r = &mut self.residents[resident.index()];
        assert!(r.dwelling.is_none(), "{resident} already owns {:?}", r.dwelling);

        d.owner = Some(resident);
        r.dwelling = Some(dwelling);
        r.neighbourhood = Some(d.neighbourhood);
        r.location = d.location;
    }

    /// Unlink a dwelling from its owner (if any).  Returns the former owner,
    /// who is now homeless.
    pub fn vacate(&mut self, dwelling: DwellingId) -> Option<ResidentId> {
        let owner = self.dwellings[dwelling.index()].owner.take()?;
        let r = &mut self.residents[owner.index()];
        assert_eq!(r.dwelling, Some(dwelling), "{owner} does not point back at {dwelling}");
        r.dwelling = None;
        r.neighbourhood = None;
        Some(owner)
    }

    /// Swap the dwellings of two housed residents.
    ///
    /// # Panics
    /// If `a == b` or either resident is homeless.
    pub fn exchange(&mut self, a: ResidentId, b: ResidentId) {
        assert_ne!(a, b, "{a} cannot trade with itself");
        let da = self.residents[a.index()].dwelling.unwrap_or_else(|| panic!("{a} is homeless"));
        let db = self.residents[b.index()].dwelling.unwrap_or_else(|| panic!("{b} is homeless"));
        self.check_ownership(a);
        self.check_ownership(b);

        self.dwellings[da.index()].owner = Some(b);
        self.dwellings[db.index()].owner = Some(a);

        let (na, la) = (self.dwellings[da.index()].neighbourhood, self.dwellings[da.index()].location);
        let (nb, lb) = (self.dwellings[db.index()].neighbourhood, self.dwellings[db.index()].location);

        let ra = &mut self.residents[a.index()];
        ra.dwelling = Some(db);
        ra.neighbourhood = Some(nb);
        ra.location = lb;

        let rb = &mut self.residents[b.index()];
        rb.dwelling = Some(da);
        rb.neighbourhood = Some(na);
        rb.location = la;
    }

    // ── Utility ───────────────────────────────────────────────────────────

    /// Contentment `resident` would have living in `dwelling`, with their
    /// current cash and salary.
    pub fn evaluate(&self, resident: ResidentId, dwelling: DwellingId) -> f64 {
        let r = self.resident(resident);
        let d = self.dwelling(dwelling);
        let quality = &self.neighbourhood(d.neighbourhood).quality;
        self.utility.contentment(&r.prefs, quality, d.price, r.salary, r.cash)
    }

    /// Contentment in the resident's current situation; `0.0` when homeless.
    pub fn current_contentment(&self, resident: ResidentId) -> f64 {
        match self.resident(resident).dwelling {
            Some(d) => self.evaluate(resident, d),
            None => 0.0,
        }
    }

    /// Recompute contentment and seeking status from the current situation.
    pub fn refresh(&mut self, resident: ResidentId, threshold: f64) {
        let contentment = self.current_contentment(resident);
        let r = self.resident_mut(resident);
        r.contentment = contentment;
        r.update_seeking(threshold);
    }

    // ── Invariant checks ──────────────────────────────────────────────────

    /// Assert the ownership invariant for one resident.
    pub fn check_ownership(&self, resident: ResidentId) {
        let r = self.resident(resident);
        match r.dwelling {
            Some(d) => {
                let dw = self.dwelling(d);
                assert_eq!(dw.owner, Some(resident), "{d} does not point back at {resident}");
                assert_eq!(r.neighbourhood, Some(dw.neighbourhood), "{resident} has a stale neighbourhood");
            }
            None => assert!(r.neighbourhood.is_none(), "homeless {resident} has a neighbourhood"),
        }
    }

    /// Assert every structural invariant of the arena.
    ///
    /// O(residents + dwellings).  Cheap enough to run after every round in
    /// tests; the simulation calls it in debug builds.
    pub fn check_invariants(&self) {
        for r in &self.residents {
            self.check_ownership(r.id);
        }
        for d in &self.dwellings {
            if let Some(owner) = d.owner {
                assert_eq!(self.resident(owner).dwelling, Some(d.id), "{owner} does not point back at {}", d.id);
            }
        }
        let listed: usize = self.neighbourhoods.iter().map(|n| n.units.len()).sum();
        assert_eq!(listed, self.dwellings.len(), "unit lists disagree with the dwelling arena");
        for n in &self.neighbourhoods {
            for &u in &n.units {
                assert_eq!(self.dwelling(u).neighbourhood, n.id, "{u} listed in the wrong neighbourhood");
            }
        }
    }
}
