//! Fragment elements and style writes.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, HtmlElement};

use crate::engine::Fragment;
use crate::error::FragmentsError;
use crate::geometry::{ClipRegion, Translation};

/// Class of the wrapper element that carries the parallax offset.
pub const FRAGMENT_CLASS: &str = "fragment";
/// Class of the inner element that carries the image, clip and scatter.
pub const PIECE_CLASS: &str = "fragment__piece";

/// Elements backing one fragment: `div.fragment > div.fragment__piece`.
pub(crate) struct FragmentNodes {
    wrapper: HtmlElement,
    piece: HtmlElement,
}

impl FragmentNodes {
    /// Create the elements and paint `fragment`. The wrapper stays detached
    /// until [`attach`](Self::attach).
    pub(crate) fn build(
        document: &Document,
        image_src: &str,
        fragment: &Fragment,
    ) -> Result<Self, FragmentsError> {
        let wrapper = create_div(document, FRAGMENT_CLASS)?;
        let piece = create_div(document, PIECE_CLASS)?;
        piece
            .style()
            .set_property("background-image", &css_url(image_src))?;

        if let Some(factor) = fragment.parallax_factor {
            wrapper.set_attribute("data-parallax", &factor.to_string())?;
        }

        let nodes = Self { wrapper, piece };
        nodes.paint_piece(fragment)?;
        nodes.wrapper.append_child(&nodes.piece)?;
        Ok(nodes)
    }

    /// Append the wrapper to `host`.
    pub(crate) fn attach(&self, host: &HtmlElement) -> Result<(), FragmentsError> {
        host.append_child(&self.wrapper)?;
        Ok(())
    }

    /// Write the clip expression and scatter transform to the piece.
    pub(crate) fn paint_piece(&self, fragment: &Fragment) -> Result<(), FragmentsError> {
        let style = self.piece.style();
        let clip = &fragment.geometry.clip;
        let value = clip.to_string();
        match clip {
            ClipRegion::Polygon(_) => {
                style.set_property("-webkit-clip-path", &value)?;
                style.set_property("clip-path", &value)?;
            }
            ClipRegion::Rect(_) => style.set_property("clip", &value)?,
        }
        set_transform(&style, fragment.geometry.translation)
    }

    /// Write the parallax offset to the wrapper.
    pub(crate) fn paint_parallax(&self, fragment: &Fragment) -> Result<(), FragmentsError> {
        set_transform(&self.wrapper.style(), fragment.parallax_offset)
    }

    /// Detach from the host.
    pub(crate) fn unmount(&self) {
        self.wrapper.remove();
    }
}

/// Attach every item in order. On the first failure, detach the ones already
/// attached and return the error, so the host is left as it was.
pub(crate) fn attach_all<T, E>(
    items: &[T],
    mut attach: impl FnMut(&T) -> Result<(), E>,
    mut detach: impl FnMut(&T),
) -> Result<(), E> {
    for (attached, item) in items.iter().enumerate() {
        if let Err(err) = attach(item) {
            items[..attached].iter().for_each(&mut detach);
            return Err(err);
        }
    }
    Ok(())
}

fn set_transform(style: &CssStyleDeclaration, t: Translation) -> Result<(), FragmentsError> {
    let value = t.to_string();
    style.set_property("-webkit-transform", &value)?;
    style.set_property("transform", &value)?;
    Ok(())
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, FragmentsError> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FragmentsError::Dom("created element is not an HtmlElement".into()))?;
    element.set_class_name(class);
    Ok(element)
}

fn css_url(src: &str) -> String {
    format!("url(\"{}\")", src.replace('"', "\\\""))
}
