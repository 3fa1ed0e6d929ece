//! Builds widgets from `.mkml` markup.
//!
//! ```mkml
//! import "avatar.mkml" as Avatar
//!
//! CircleImageView {
//!     style: Avatar
//!     radius: 12dp
//!     src: profile
//! }
//! ```
//!
//! Properties become the widget's [`AttributeSet`](crate::attrs::AttributeSet).
//! `style` names a default style registered in the [`Context`](crate::context::Context)
//! and `src` names a drawable resource.
//!
//! ```rust,ignore
//! let mut loader = DslLoader::new();
//! loader.parse_and_register("Avatar", include_str!("../ui/avatar.mkml"))?;
//! let doc = loader.parse(include_str!("../ui/main.mkml"))?;
//! let mut view = loader.build(&doc, &ctx)?;
//! ```

pub mod builder;

pub use builder::DslLoader;
