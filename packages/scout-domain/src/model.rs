use crate::QName;

pub fn type_content() -> QName {
	QName::content("content")
}

pub fn type_folder() -> QName {
	QName::content("folder")
}

pub fn type_system_folder() -> QName {
	QName::content("systemfolder")
}

pub fn type_file_link() -> QName {
	QName::application("filelink")
}

pub fn type_folder_link() -> QName {
	QName::application("folderlink")
}

pub fn prop_name() -> QName {
	QName::content("name")
}

pub fn prop_title() -> QName {
	QName::content("title")
}

pub fn prop_description() -> QName {
	QName::content("description")
}

pub fn prop_content() -> QName {
	QName::content("content")
}

pub fn prop_created() -> QName {
	QName::content("created")
}

pub fn prop_modified() -> QName {
	QName::content("modified")
}

pub fn prop_link_destination() -> QName {
	QName::content("destination")
}

pub fn prop_lock_owner() -> QName {
	QName::content("lockOwner")
}

pub fn prop_locale() -> QName {
	QName::system("locale")
}

pub fn prop_icon() -> QName {
	QName::application("icon")
}

pub fn aspect_archived() -> QName {
	QName::system("archived")
}

pub fn prop_archived_by() -> QName {
	QName::system("archivedBy")
}

pub fn prop_archived_date() -> QName {
	QName::system("archivedDate")
}
