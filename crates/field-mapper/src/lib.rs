//! # Modal Field Mapper
//!
//! Heuristic field discovery for editing panels whose markup is not known in
//! advance.
//!
//! ## Philosophy
//!
//! The mapper never needs per-panel binding code. It:
//! - Recognizes native inputs, textareas and selects by tag
//! - Recognizes composite widgets (button groups, multi-selects, checkbox lists) by structure
//! - Infers a name for each field from identifiers, labels, placeholders and headings
//! - Emits a selector an automation pass can use to find the field again
//!
//! Nothing in a scan fails: elements without a name are skipped and selectors
//! degrade to positional ones.
//!
//! ## Architecture
//!
//! ```text
//! Panel root (any `Node`)
//!     │
//!     ├──> ScanTree index (document order, parents, siblings)
//!     │
//!     ├──> Native passes: input → textarea → select
//!     │    ├─> Field Classifier (kind, data type, required, options)
//!     │    ├─> Name Resolver    (name/id → label[for] → label → placeholder)
//!     │    └─> Selector         (#id → [name] → [data-field] → .class → nth-of-type)
//!     │
//!     ├──> Widget passes: one per registered matcher
//!     │    └─> data-field → nearby label → nearby heading
//!     │
//!     └──> FieldMapping[] ──> optional MappingCache (keyed by activity type)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use modal_field_mapper::{scan_modal_fields, DataType, Element, FieldKind};
//!
//! let modal = Element::parse(r#"
//!     <div class="modal">
//!         <label for="email">E-mail do aluno</label>
//!         <input id="email" type="email" required=""/>
//!         <select id="grade">
//!             <option value=""></option>
//!             <option>A</option>
//!             <option>B</option>
//!         </select>
//!     </div>
//! "#).unwrap();
//!
//! let fields = scan_modal_fields(&modal);
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[0].name, "email");
//! assert_eq!(fields[0].selector, "#email");
//! assert_eq!(fields[0].kind, FieldKind::NativeInput);
//! assert!(fields[0].required);
//! assert_eq!(fields[1].data_type, DataType::String);
//! assert_eq!(fields[1].options.as_deref(), Some(&["A".to_string(), "B".to_string()][..]));
//! ```

mod cache;
mod classify;
mod config;
mod error;
mod markup;
mod naming;
mod node;
mod scanner;
mod selector;
mod types;
mod widgets;

pub use cache::{all_cached_mappings, cache_field_mappings, cached_field_mappings, MappingCache};
pub use classify::FieldTraits;
pub use config::{MapperConfig, WidgetConvention};
pub use error::{MapperError, Result};
pub use markup::{Content, Element};
pub use naming::{normalize_field_name, NameResolver, NameSource, ResolvedName};
pub use node::{Node, NodeId, ScanTree};
pub use scanner::{scan_modal_fields, FieldScanner};
pub use selector::{resolve, Selector};
pub use types::{DataType, FieldKind, FieldMapping, InputType, Validation, EMAIL_PATTERN};
pub use widgets::{
    ButtonGroupMatcher, CheckboxListMatcher, MultiSelectMatcher, WidgetMatcher, WidgetRegistry,
};
