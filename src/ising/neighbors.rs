use super::lattice::Site;

/// The four nearest neighbours of `site` on an `size` x `size` torus,
/// in the order `(x+1, y)`, `(x-1, y)`, `(x, y+1)`, `(x, y-1)`.
///
/// Both "minus" directions are computed as `+ (size - 1)` followed by an
/// explicit modulo, so the result never relies on signed index wraparound.
/// For `size == 1` every neighbour is the site itself.
pub fn neighbors(site: Site, size: usize) -> [Site; 4] {
    debug_assert!(size > 0 && site.x < size && site.y < size);
    let Site { x, y } = site;
    [
        Site::new((x + 1) % size, y),
        Site::new((x + size - 1) % size, y),
        Site::new(x, (y + 1) % size),
        Site::new(x, (y + size - 1) % size),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_site() {
        let n = neighbors(Site::new(2, 3), 6);
        assert_eq!(
            n,
            [
                Site::new(3, 3),
                Site::new(1, 3),
                Site::new(2, 4),
                Site::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_single_site_lattice() {
        let site = Site::new(0, 0);
        assert_eq!(neighbors(site, 1), [site; 4]);
    }

    #[test]
    fn test_two_site_lattice() {
        // Both directions land on the same partner
        let n = neighbors(Site::new(0, 1), 2);
        assert_eq!(n[0], n[1]);
        assert_eq!(n[2], n[3]);
        assert_eq!(n[0], Site::new(1, 1));
        assert_eq!(n[2], Site::new(0, 0));
    }
}
