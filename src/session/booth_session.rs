use crate::{
    assets::{
        decode::{Photo, build_thread_pool, decode_all, decode_photo},
        encode::{EncodedImage, encode_rgba},
    },
    catalog::frames::FrameCatalog,
    foundation::error::{BoothError, BoothResult},
    layout::grid::GridSpec,
    render::{filter::CameraFilter, frame::apply_frame_encoded, grid::compose},
    session::opts::SessionOpts,
};

/// State carried across the kiosk screens for one customer.
///
/// The flow is: pick a filter and a grid, capture photos, compose them into a print, then
/// optionally try frames on it. Frames are always applied to the unframed composite, so picking
/// a second frame replaces the first instead of nesting inside it.
pub struct BoothSession {
    opts: SessionOpts,
    pool: Option<rayon::ThreadPool>,
    catalog: Option<FrameCatalog>,

    filter: CameraFilter,
    grid: Option<GridSpec>,
    captures: Vec<Photo>,
    composite: Option<EncodedImage>,
    original: Option<EncodedImage>,
    frame_id: Option<String>,
}

impl BoothSession {
    pub fn new(opts: SessionOpts) -> BoothResult<Self> {
        opts.validate()?;
        let pool = match opts.threads {
            Some(_) => Some(build_thread_pool(opts.threads)?),
            None => None,
        };
        Ok(Self {
            opts,
            pool,
            catalog: None,
            filter: CameraFilter::None,
            grid: None,
            captures: Vec::new(),
            composite: None,
            original: None,
            frame_id: None,
        })
    }

    /// Use `catalog` instead of the built-in frames for [`BoothSession::apply_frame`].
    pub fn with_catalog(mut self, catalog: FrameCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    pub fn catalog(&self) -> &FrameCatalog {
        match &self.catalog {
            Some(catalog) => catalog,
            None => FrameCatalog::builtin(),
        }
    }

    /// Filter applied to photos captured from now on. Earlier captures keep theirs.
    pub fn set_filter(&mut self, filter: CameraFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> CameraFilter {
        self.filter
    }

    /// Choose the print layout. Captures taken for a previous layout are discarded.
    pub fn select_grid(&mut self, grid: GridSpec) -> BoothResult<()> {
        grid.validate()?;
        tracing::debug!(columns = grid.columns, rows = grid.rows, id = ?grid.id, "grid selected");
        self.grid = Some(grid);
        self.captures.clear();
        Ok(())
    }

    pub fn grid(&self) -> Option<&GridSpec> {
        self.grid.as_ref()
    }

    /// Record a capture with the current filter applied.
    pub fn capture(&mut self, mut photo: Photo) -> BoothResult<()> {
        let Some(grid) = &self.grid else {
            return Err(BoothError::validation("no grid selected"));
        };
        let capacity = grid.cell_count();
        if self.captures.len() >= capacity {
            return Err(BoothError::validation(format!(
                "grid already holds {capacity} photos"
            )));
        }
        self.filter.apply(photo.pixels_mut());
        self.captures.push(photo);
        Ok(())
    }

    /// Decode and record one encoded capture.
    pub fn capture_encoded(&mut self, bytes: &[u8]) -> BoothResult<()> {
        let photo = decode_photo(bytes)?;
        self.capture(photo)
    }

    /// Decode every source (in parallel) and record them in order.
    ///
    /// Nothing is recorded when any source fails to decode or the sources overflow the grid.
    pub fn capture_all<S>(&mut self, sources: &[S]) -> BoothResult<()>
    where
        S: AsRef<[u8]> + Sync,
    {
        let Some(grid) = &self.grid else {
            return Err(BoothError::validation("no grid selected"));
        };
        let free = grid.cell_count().saturating_sub(self.captures.len());
        if sources.len() > free {
            return Err(BoothError::validation(format!(
                "{} photos do not fit, grid has room for {free}",
                sources.len()
            )));
        }
        let photos = decode_all(sources, self.pool.as_ref())?;
        for photo in photos {
            self.capture(photo)?;
        }
        Ok(())
    }

    pub fn clear_captures(&mut self) {
        self.captures.clear();
    }

    pub fn captures(&self) -> &[Photo] {
        &self.captures
    }

    /// Compose the captures into a print and make it the current composite.
    ///
    /// Any earlier composite and frame selection are discarded.
    #[tracing::instrument(skip(self), fields(captures = self.captures.len()))]
    pub fn compose(&mut self) -> BoothResult<&EncodedImage> {
        let grid = self
            .grid
            .as_ref()
            .ok_or_else(|| BoothError::validation("no grid selected"))?;
        let composite = compose(&self.captures, grid, self.opts.dpi)?;
        let encoded = encode_rgba(&composite.pixels, self.opts.output)?;
        self.original = None;
        self.frame_id = None;
        Ok(&*self.composite.insert(encoded))
    }

    /// Frame the unframed composite with the catalog frame `id`.
    ///
    /// The framed image becomes the current composite; the unframed one is kept aside.
    #[tracing::instrument(skip(self))]
    pub fn apply_frame(&mut self, id: &str) -> BoothResult<&EncodedImage> {
        let base = self
            .original
            .as_ref()
            .or(self.composite.as_ref())
            .ok_or_else(|| BoothError::validation("no composite to frame"))?;
        let frame = self.catalog().require(id)?;
        let framed = apply_frame_encoded(base, frame, self.opts.output)?;

        if self.original.is_none() {
            self.original = self.composite.take();
        }
        self.frame_id = Some(id.to_owned());
        Ok(&*self.composite.insert(framed))
    }

    /// Current print: framed when a frame was applied, otherwise the plain composite.
    pub fn composite(&self) -> Option<&EncodedImage> {
        self.composite.as_ref()
    }

    /// The composite before any frame was applied.
    pub fn original_composite(&self) -> Option<&EncodedImage> {
        self.original.as_ref().or(self.composite.as_ref())
    }

    pub fn selected_frame(&self) -> Option<&str> {
        self.frame_id.as_deref()
    }

    /// Start over for the next customer. Options and catalog are kept.
    pub fn reset(&mut self) {
        self.filter = CameraFilter::None;
        self.grid = None;
        self.captures.clear();
        self.composite = None;
        self.original = None;
        self.frame_id = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/booth_session.rs"]
mod tests;
