//! Carte de résumé du village sélectionné

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement};

use village_map::Selection;

pub const CARD_CLASS: &str = "village-card";

pub struct SummaryCard {
    root: HtmlElement,
    title: Element,
    zone: HtmlElement,
    key: Element,
    link: HtmlAnchorElement,
    _on_close: Closure<dyn FnMut()>,
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{}> has unexpected type", tag)))
}

impl SummaryCard {
    /// Construit la carte (masquée) dans `container`. `on_close` est appelé
    /// au clic sur « 關閉 ».
    pub fn new(
        document: &Document,
        container: &Element,
        on_close: impl Fn() + 'static,
    ) -> Result<Self, JsValue> {
        let root: HtmlElement = create(document, "div", CARD_CLASS)?;
        let title: Element = create(document, "div", "village-card__title")?;
        let zone: HtmlElement = create(document, "span", "village-card__zone")?;
        let key: Element = create(document, "div", "village-card__key")?;
        let actions: Element = create(document, "div", "village-card__actions")?;

        let link: HtmlAnchorElement = create(document, "a", "village-card__link")?;
        link.set_text_content(Some("查看詳細"));

        let close: HtmlElement = create(document, "button", "village-card__close")?;
        close.set_text_content(Some("關閉"));
        let on_close = Closure::<dyn FnMut()>::new(on_close);
        close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;

        actions.append_child(&link)?;
        actions.append_child(&close)?;
        root.append_child(&title)?;
        root.append_child(&zone)?;
        root.append_child(&key)?;
        root.append_child(&actions)?;
        container.append_child(&root)?;

        let card = Self {
            root,
            title,
            zone,
            key,
            link,
            _on_close: on_close,
        };
        card.render(None);
        Ok(card)
    }

    /// Affiche la sélection, ou masque la carte
    pub fn render(&self, selection: Option<&Selection>) {
        let Some(selection) = selection else {
            self.root.set_hidden(true);
            return;
        };

        self.title.set_text_content(Some(&format!(
            "{}｜{}",
            selection.district, selection.village
        )));
        self.zone.set_text_content(Some(selection.zone.label()));
        let _ = self
            .zone
            .style()
            .set_property("background-color", selection.zone.color());
        self.key
            .set_text_content(Some(&format!("Key：{}", selection.id)));
        self.link.set_href(&selection.detail_href());
        self.root.set_hidden(false);
    }

    pub fn is_visible(&self) -> bool {
        !self.root.hidden()
    }

    pub fn element(&self) -> &HtmlElement {
        &self.root
    }
}

impl Drop for SummaryCard {
    fn drop(&mut self) {
        self.root.remove();
    }
}
