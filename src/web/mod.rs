//! Browser binding.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WebTable } from 'stickygrid';
//! await init();
//! const table = new WebTable(contentDiv, affixHeaderDiv, { fixedRows: [1, 0] });
//! table.setColumns(columns);
//! table.setRows(data);
//! // after each render:
//! const pos = table.positions();
//! // on unmount:
//! table.destroy();
//! ```

mod console;
mod dom_host;

pub use dom_host::{DomHost, SharedTable};

use serde::Serialize;
use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::TableConfig;
use crate::table::FixedTable;
use crate::types::Column;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// Fixed column/row layout for one rendered table, exported to JavaScript
#[wasm_bindgen]
pub struct WebTable {
    inner: SharedTable,
}

impl WebTable {
    fn table(&self) -> Result<RefMut<'_, FixedTable<DomHost>>, JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("table is busy"))
    }
}

#[wasm_bindgen]
impl WebTable {
    /// Attach to a rendered table.
    ///
    /// `content` is the scrollable element wrapping the `<table>`;
    /// `affix_header` the optional sticky header copy kept in horizontal sync.
    #[wasm_bindgen(constructor)]
    pub fn new(
        content: HtmlElement,
        affix_header: Option<HtmlElement>,
        config: JsValue,
    ) -> Result<WebTable, JsValue> {
        console_error_panic_hook::set_once();
        console::init(log::LevelFilter::Warn);

        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let table = FixedTable::new(DomHost::new(content, affix_header), config)?;
        let inner = Rc::new(RefCell::new(table));
        {
            let mut table = inner
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("table is busy"))?;
            table.host_mut().bind(&inner);
            table.mount()?;
        }
        Ok(WebTable { inner })
    }

    #[wasm_bindgen(js_name = setColumns)]
    pub fn set_columns(&self, columns: JsValue) -> Result<(), JsValue> {
        let columns: Vec<Column> = serde_wasm_bindgen::from_value(columns)?;
        Ok(self.table()?.set_columns(columns)?)
    }

    #[wasm_bindgen(js_name = setRows)]
    pub fn set_rows(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(rows)?;
        Ok(self.table()?.set_rows(rows)?)
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config: TableConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(self.table()?.set_config(config)?)
    }

    /// Re-measure after a size change the window did not report
    pub fn refresh(&self) -> Result<(), JsValue> {
        Ok(self.table()?.refresh()?)
    }

    /// Current position map `{ columns: {...}, rows: {...} }`
    pub fn positions(&self) -> Result<JsValue, JsValue> {
        let positions = self.table()?.positions();
        to_js(positions.as_ref())
    }

    /// Classes and offsets for a column at `index` among its siblings
    #[wasm_bindgen(js_name = columnStyle)]
    pub fn column_style(&self, column: JsValue, index: usize) -> Result<JsValue, JsValue> {
        let column: Column = serde_wasm_bindgen::from_value(column)?;
        let style = self.table()?.column_style(&column, index);
        to_js(&style)
    }

    /// Classes and offsets for the body row at `index`
    #[wasm_bindgen(js_name = rowStyle)]
    pub fn row_style(&self, index: usize) -> Result<JsValue, JsValue> {
        let style = self.table()?.row_style(index);
        to_js(&style)
    }

    /// Shadow flags `{ left, right }`
    pub fn shadow(&self) -> Result<JsValue, JsValue> {
        let shadow = self.table()?.column_shadow();
        to_js(&shadow)
    }

    /// Shadow classes for the content viewport
    #[wasm_bindgen(js_name = shadowClasses)]
    pub fn shadow_classes(&self) -> Result<JsValue, JsValue> {
        let classes = self.table()?.shadow_classes();
        to_js(&classes)
    }

    /// Derived flags and measurements (fixed header, widths, shadow, ...)
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.table()?.state();
        to_js(&state)
    }

    /// Detach every listener and cancel pending work
    pub fn destroy(&self) -> Result<(), JsValue> {
        self.table()?.detach();
        Ok(())
    }
}
