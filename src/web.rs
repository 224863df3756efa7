use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::{Nullable, Optional, OptionalError};

// `null` and `undefined` are both the absence marker on the JS side.
impl Nullable for JsValue {
    type Value = JsValue;

    fn into_present(self) -> Option<JsValue> {
        if self.is_absent() {
            None
        } else {
            Some(self)
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null() || self.is_undefined()
    }
}

#[wasm_bindgen]
extern "C" {
    // The global `String(value)` conversion.
    #[wasm_bindgen(js_name = String, catch)]
    fn js_string(value: &JsValue) -> Result<String, JsValue>;
}

thread_local! {
    static EMPTY: JsValue = JsValue::from(JsOptional {
        inner: Optional::empty(),
    });
}

/// The one JS object every empty result resolves to.
fn empty_handle() -> JsValue {
    EMPTY.with(JsValue::clone)
}

fn wrap(inner: Optional<JsValue>) -> JsValue {
    if inner.is_empty() {
        empty_handle()
    } else {
        JsOptional { inner }.into()
    }
}

fn is_container(value: &JsValue) -> bool {
    value.is_object()
        && EMPTY.with(|empty| {
            Object::is(
                &Object::get_prototype_of(value),
                &Object::get_prototype_of(empty),
            )
        })
}

fn call_method(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.call0(target)
}

fn to_js_error(err: OptionalError) -> JsValue {
    let error = js_sys::Error::new(&err.to_string());
    error.set_name(if err.is_null_reference() {
        "NullReferenceError"
    } else {
        "NoSuchElementError"
    });
    error.into()
}

/// `Optional` as seen from JavaScript.
///
/// Every empty result is the same JS object. Exceptions thrown by callbacks
/// propagate to the caller unchanged.
#[wasm_bindgen(js_name = Optional)]
pub struct JsOptional {
    inner: Optional<JsValue>,
}

#[wasm_bindgen(js_class = Optional)]
impl JsOptional {
    pub fn empty() -> JsValue {
        empty_handle()
    }

    pub fn of(value: JsValue) -> Result<JsValue, JsValue> {
        Optional::of(value).map(wrap).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = ofNullable)]
    pub fn of_nullable(value: JsValue) -> JsValue {
        wrap(Optional::of_nullable(value))
    }

    #[wasm_bindgen(js_name = isPresent)]
    pub fn is_present(&self) -> bool {
        self.inner.is_present()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self) -> Result<JsValue, JsValue> {
        self.inner.get().cloned().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = ifPresent)]
    pub fn if_present(&self, consumer: &Function) -> Result<(), JsValue> {
        self.inner
            .try_if_present(|value| consumer.call1(&JsValue::UNDEFINED, value).map(drop))
    }

    /// An accepting predicate yields a new wrapper around the same held
    /// value; it `equals` the receiver but is a different JS object.
    pub fn filter(&self, predicate: &Function) -> Result<JsValue, JsValue> {
        self.inner
            .clone()
            .try_filter(|value| {
                predicate
                    .call1(&JsValue::UNDEFINED, value)
                    .map(|verdict| verdict.is_truthy())
            })
            .map(wrap)
    }

    pub fn map(&self, mapper: &Function) -> Result<JsValue, JsValue> {
        self.inner
            .clone()
            .try_map(|value| mapper.call1(&JsValue::UNDEFINED, value))
            .map(wrap)
    }

    /// The mapper's return value comes back as the very same JS object.
    #[wasm_bindgen(js_name = flatMap)]
    pub fn flat_map(&self, mapper: &Function) -> Result<JsValue, JsValue> {
        let Some(value) = self.inner.as_option() else {
            return Ok(empty_handle());
        };
        mapper
            .call1(&JsValue::UNDEFINED, value)?
            .into_present()
            .ok_or_else(|| to_js_error(OptionalError::NullReference("Optional.flatMap")))
    }

    #[wasm_bindgen(js_name = orElse)]
    pub fn or_else(&self, other: JsValue) -> JsValue {
        self.inner.or_else(other)
    }

    #[wasm_bindgen(js_name = orElseGet)]
    pub fn or_else_get(&self, supplier: &Function) -> Result<JsValue, JsValue> {
        self.inner
            .or_else_try_get(|| supplier.call0(&JsValue::UNDEFINED))
    }

    #[wasm_bindgen(js_name = orElseThrow)]
    pub fn or_else_throw(&self, error_supplier: &Function) -> Result<JsValue, JsValue> {
        self.inner
            .or_else_throw(|| {
                error_supplier
                    .call0(&JsValue::UNDEFINED)
                    .unwrap_or_else(|thrown| thrown)
            })
            .cloned()
    }

    /// False for anything that is not an `Optional`, `null` included.
    /// Held values compare with `Object.is`.
    pub fn equals(&self, other: &JsValue) -> Result<bool, JsValue> {
        if !is_container(other) {
            return Ok(false);
        }
        let other_present = call_method(other, "isPresent")?.is_truthy();
        match self.inner.as_option() {
            None => Ok(!other_present),
            Some(value) => Ok(other_present && Object::is(value, &call_method(other, "get")?)),
        }
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> Result<String, JsValue> {
        match self.inner.as_option() {
            Some(value) => Ok(format!("Optional[{}]", js_string(value)?)),
            None => Ok(String::from("Optional.empty")),
        }
    }
}

impl From<Optional<JsValue>> for JsOptional {
    fn from(inner: Optional<JsValue>) -> Self {
        JsOptional { inner }
    }
}

// Initialize the web module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error reporting
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
