#[path = "../src/error.rs"]
mod error;
#[path = "../src/links.rs"]
mod links;
#[path = "../src/pe.rs"]
mod pe;
#[path = "../src/shortcuts.rs"]
mod shortcuts;

use std::fs;

use shortcuts::FileShell;

const GUI: u16 = 2;
const CONSOLE: u16 = 3;

#[test]
fn only_gui_executables_get_shortcuts() {
    let tmp = tempfile::tempdir().unwrap();
    let install = tmp.path().join("install");
    let menu = tmp.path().join("menu");
    fs::create_dir_all(install.join("x64")).unwrap();
    fs::create_dir_all(&menu).unwrap();

    fs::write(install.join("tool.exe"), pe::synthetic_image(GUI, false)).unwrap();
    fs::write(install.join("util.exe"), pe::synthetic_image(CONSOLE, false)).unwrap();
    fs::write(install.join("x64").join("Viewer64.EXE"), pe::synthetic_image(GUI, true)).unwrap();
    fs::write(install.join("Eula.txt"), "terms").unwrap();
    fs::write(install.join("readme.chm"), pe::synthetic_image(GUI, false)).unwrap();

    let shell = FileShell::new(tmp.path());
    let report = links::create_links(&install, &menu, &shell).unwrap();

    assert_eq!(report.created.len(), 2);
    assert_eq!(report.console, 1);
    assert!(report.unreadable.is_empty());

    let tool = menu.join("tool.lnk");
    assert!(tool.exists());
    assert_eq!(
        fs::read_to_string(&tool).unwrap(),
        install.join("tool.exe").display().to_string()
    );
    assert!(menu.join("Viewer64.lnk").exists());
    assert!(!menu.join("util.lnk").exists());
    assert!(!menu.join("readme.lnk").exists());
    assert!(!menu.join("Eula.lnk").exists());
}

#[test]
fn malformed_executables_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let install = tmp.path().join("install");
    let menu = tmp.path().join("menu");
    fs::create_dir_all(&install).unwrap();
    fs::create_dir_all(&menu).unwrap();

    fs::write(install.join("broken.exe"), b"not a portable executable").unwrap();
    fs::write(install.join("empty.exe"), b"").unwrap();
    fs::write(install.join("zoomit.exe"), pe::synthetic_image(GUI, false)).unwrap();

    let shell = FileShell::new(tmp.path());
    let report = links::create_links(&install, &menu, &shell).unwrap();

    assert_eq!(report.created, vec![menu.join("zoomit.lnk")]);
    assert_eq!(
        report.unreadable,
        vec![install.join("broken.exe"), install.join("empty.exe")]
    );
    assert!(!menu.join("broken.lnk").exists());
}

#[test]
fn missing_install_dir_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let shell = FileShell::new(tmp.path());
    let err = links::create_links(&tmp.path().join("nope"), tmp.path(), &shell).unwrap_err();
    assert!(matches!(err, error::InstallError::Io { .. }));
}

#[test]
fn same_named_executables_share_one_shortcut() {
    let tmp = tempfile::tempdir().unwrap();
    let install = tmp.path().join("install");
    let menu = tmp.path().join("menu");
    fs::create_dir_all(install.join("ARM64")).unwrap();
    fs::create_dir_all(&menu).unwrap();

    fs::write(install.join("ARM64").join("tool.exe"), pe::synthetic_image(GUI, true)).unwrap();
    fs::write(install.join("tool.exe"), pe::synthetic_image(GUI, false)).unwrap();
    fs::write(install.join("ARM64").join("Other.exe"), pe::synthetic_image(GUI, true)).unwrap();

    let shell = FileShell::new(tmp.path());
    let report = links::create_links(&install, &menu, &shell).unwrap();

    assert_eq!(
        report.created,
        vec![menu.join("tool.lnk"), menu.join("Other.lnk")]
    );
    assert_eq!(report.duplicates, vec![install.join("ARM64").join("tool.exe")]);
    assert_eq!(
        fs::read_to_string(menu.join("tool.lnk")).unwrap(),
        install.join("tool.exe").display().to_string()
    );
    assert_eq!(fs::read_dir(&menu).unwrap().count(), 2);
}
