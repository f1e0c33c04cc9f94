pub mod gallery;
pub mod upload;

pub use gallery::{handle_gallery, GalleryResponse, __path_handle_gallery};
pub use upload::{handle_upload, UploadForm, UploadResponse, UPLOAD_FIELD, __path_handle_upload};
