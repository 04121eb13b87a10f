const SMALL_PREFIX: &str = "/images/filetypes/";
const LARGE_PREFIX: &str = "/images/filetypes32/";
const SUFFIX: &str = ".gif";
const DEFAULT_IMAGE: &str = "_default";
// Extensions with a dedicated icon in the web client image set.
const KNOWN_EXTENSIONS: &[&str] = &[
	"bmp", "doc", "docx", "gif", "htm", "html", "jpeg", "jpg", "js", "mp3", "mpeg", "mpg", "odg",
	"odp", "ods", "odt", "pdf", "png", "ppt", "pptx", "rtf", "tif", "tiff", "txt", "xls", "xlsx",
	"xml", "zip",
];

pub fn file_type_image(name: &str, small: bool) -> String {
	let prefix = if small { SMALL_PREFIX } else { LARGE_PREFIX };
	let image = name
		.rsplit_once('.')
		.map(|(_, ext)| ext.to_lowercase())
		.filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
		.unwrap_or_else(|| DEFAULT_IMAGE.to_string());

	format!("{prefix}{image}{SUFFIX}")
}
