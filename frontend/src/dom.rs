use gfo_converter::markup::{row_class, row_markup};
use gfo_converter::{ResultRow, Validity, View};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, HtmlInputElement};

pub const URL_INPUT_ID: &str = "urlInput";
pub const CONVERT_BUTTON_ID: &str = "btnConvertURL";
pub const DOWNLOAD_BUTTON_ID: &str = "btnDownload";
pub const ARTIFACTS_ID: &str = "artifacts";

pub fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}

/// The converter's view of the page document.
pub struct DomView {
    document: Document,
    input: HtmlInputElement,
    artifacts: Element,
    root_style: CssStyleDeclaration,
}

impl DomView {
    pub fn attach(document: Document) -> Result<Self, JsValue> {
        let input = element(&document, URL_INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str("#urlInput is not an input element"))?;
        let artifacts = element(&document, ARTIFACTS_ID)?;
        let root_style = document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .map(|root| root.style())
            .ok_or_else(|| JsValue::from_str("document has no html root"))?;

        Ok(Self {
            document,
            input,
            artifacts,
            root_style,
        })
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }
}

fn report(context: &str, err: JsValue) {
    warn!(error = ?err, "{}", context);
}

impl View for DomView {
    fn field_value(&self) -> String {
        self.input.value()
    }

    fn set_field_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn set_validity(&mut self, validity: Validity) {
        let classes = self.input.class_list();
        if let Err(e) = classes.remove_2(Validity::VALID_CLASS, Validity::INVALID_CLASS) {
            report("clearing validity classes failed", e);
        }
        if let Some(class) = validity.class()
            && let Err(e) = classes.add_1(class)
        {
            report("setting validity class failed", e);
        }
    }

    fn append_row(&mut self, row: &ResultRow) {
        let div = match self.document.create_element("div") {
            Ok(div) => div,
            Err(e) => return report("creating result row failed", e),
        };
        div.set_class_name(row_class(row));
        div.set_inner_html(&row_markup(row));
        if let Err(e) = self.artifacts.append_child(&div) {
            report("appending result row failed", e);
        }
    }

    fn set_style_variable(&mut self, name: &str, value: &str) {
        if let Err(e) = self.root_style.set_property(name, value) {
            report("setting style variable failed", e);
        }
    }
}
