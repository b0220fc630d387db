//! Symbol-Layer: besitzt Kartenansicht und Track-Symbole und hält die
//! zuletzt gerenderten Pfaddaten je Symbol.

use indexmap::IndexMap;
use std::ops::{Deref, DerefMut};

use crate::core::{LatLng, MapProjection, PixelBounds, SymbolEvent, TrackSymbol, WebMercatorView};

/// Rendering-Oberfläche für Track-Symbole.
///
/// Symbole werden in Einfüge-Reihenfolge gezeichnet. Jede Änderung über
/// [`SymbolLayer::update`] oder [`SymbolLayer::symbol_mut`] wird neu projiziert
/// und gerendert, bevor der Aufrufer wieder Zugriff auf den Layer hat.
#[derive(Debug, Clone)]
pub struct SymbolLayer {
    view: WebMercatorView,
    symbols: IndexMap<String, TrackSymbol>,
    /// Pfaddaten (`d`-Attribut) je Symbol-ID
    paths: IndexMap<String, String>,
    /// Move-Events werden nur gesammelt, wenn eingeschaltet
    record_events: bool,
    events: Vec<(String, SymbolEvent)>,
}

impl SymbolLayer {
    /// Erstellt einen leeren Layer für die gegebene Ansicht
    pub fn new(view: WebMercatorView) -> Self {
        Self {
            view,
            symbols: IndexMap::new(),
            paths: IndexMap::new(),
            record_events: false,
            events: Vec::new(),
        }
    }

    /// Sammelt Move-Events der Symbole für [`SymbolLayer::drain_events`].
    ///
    /// Ohne diesen Schalter werden Events der Symbole beim Rendern verworfen.
    /// Wer einschaltet, muss regelmäßig `drain_events` aufrufen.
    pub fn with_move_events(mut self) -> Self {
        self.record_events = true;
        self
    }

    pub fn view(&self) -> &WebMercatorView {
        &self.view
    }

    /// Fügt ein Symbol hinzu und rendert es sofort.
    ///
    /// Ein vorhandenes Symbol mit gleicher ID wird ersetzt und zurückgegeben.
    pub fn attach(
        &mut self,
        id: impl Into<String>,
        mut symbol: TrackSymbol,
    ) -> Option<TrackSymbol> {
        let id = id.into();
        // Events vor dem Hinzufügen gehören nicht zum Layer
        symbol.take_events();
        let path = symbol.redraw(&self.view);
        log::debug!("Symbol '{}' hinzugefügt", id);
        self.paths.insert(id.clone(), path);
        self.symbols.insert(id, symbol)
    }

    /// Entfernt ein Symbol samt Pfaddaten.
    pub fn detach(&mut self, id: &str) -> Option<TrackSymbol> {
        self.paths.shift_remove(id);
        let removed = self.symbols.shift_remove(id);
        if removed.is_some() {
            log::debug!("Symbol '{}' entfernt", id);
        }
        removed
    }

    /// Wendet Setter auf ein Symbol an und rendert es sofort neu.
    ///
    /// Gibt die neuen Pfaddaten zurück, `None` wenn die ID unbekannt ist.
    pub fn update<F>(&mut self, id: &str, apply: F) -> Option<&str>
    where
        F: FnOnce(&mut TrackSymbol),
    {
        {
            let mut symbol = self.symbol_mut(id)?;
            apply(&mut *symbol);
        }
        self.path(id)
    }

    /// Setzt Mittelpunkt und Zoom und projiziert alle Symbole neu.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.view.set_view(center, zoom);
        self.reproject_all();
    }

    /// Ändert den Zoom-Level und projiziert alle Symbole neu.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.set_zoom(zoom);
        self.reproject_all();
    }

    fn reproject_all(&mut self) {
        for (id, symbol) in self.symbols.iter_mut() {
            self.paths.insert(id.clone(), symbol.redraw(&self.view));
        }
        log::debug!(
            "{} Symbole neu projiziert (Zoom {:.2})",
            self.symbols.len(),
            self.view.zoom()
        );
    }

    /// Pfaddaten des Symbols
    pub fn path(&self, id: &str) -> Option<&str> {
        self.paths.get(id).map(String::as_str)
    }

    pub fn symbol(&self, id: &str) -> Option<&TrackSymbol> {
        self.symbols.get(id)
    }

    /// Schreibzugriff für mehrere Setter mit einem einzigen Redraw.
    ///
    /// Gerendert wird, sobald der zurückgegebene Zugriff fällt.
    pub fn symbol_mut(&mut self, id: &str) -> Option<SymbolMut<'_>> {
        let (_, key, symbol) = self.symbols.get_full_mut(id)?;
        Some(SymbolMut {
            id: key.as_str(),
            symbol,
            view: &self.view,
            paths: &mut self.paths,
            events: self.record_events.then_some(&mut self.events),
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Alle Symbole in Zeichen-Reihenfolge
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackSymbol)> {
        self.symbols.iter().map(|(id, symbol)| (id.as_str(), symbol))
    }

    /// IDs aller Symbole, deren Bounding-Box den Viewport schneidet.
    pub fn visible_ids(&self) -> Vec<&str> {
        let viewport: PixelBounds = self.view.viewport_layer_bounds();
        self.symbols
            .iter()
            .filter(|(_, symbol)| {
                symbol
                    .pixel_bounds()
                    .is_some_and(|bounds| bounds.intersects(&viewport))
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Entnimmt alle gesammelten Events (mit Symbol-ID).
    pub fn drain_events(&mut self) -> Vec<(String, SymbolEvent)> {
        std::mem::take(&mut self.events)
    }
}

/// Schreibzugriff auf ein Symbol im Layer, rendert beim Drop neu.
pub struct SymbolMut<'a> {
    id: &'a str,
    symbol: &'a mut TrackSymbol,
    view: &'a WebMercatorView,
    paths: &'a mut IndexMap<String, String>,
    events: Option<&'a mut Vec<(String, SymbolEvent)>>,
}

impl Deref for SymbolMut<'_> {
    type Target = TrackSymbol;

    fn deref(&self) -> &TrackSymbol {
        &*self.symbol
    }
}

impl DerefMut for SymbolMut<'_> {
    fn deref_mut(&mut self) -> &mut TrackSymbol {
        &mut *self.symbol
    }
}

impl Drop for SymbolMut<'_> {
    fn drop(&mut self) {
        let id = self.id;
        let events = self.symbol.take_events();
        if let Some(queue) = self.events.as_deref_mut() {
            queue.extend(events.into_iter().map(|e| (id.to_owned(), e)));
        }
        if self.symbol.redraw_requested() {
            let path = self.symbol.redraw(self.view);
            self.paths.insert(id.to_owned(), path);
        }
    }
}
